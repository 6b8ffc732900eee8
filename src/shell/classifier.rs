// ABOUTME: Classifies one input line into builtin, container run, or external exec

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Exit,
    Ps,
    Kill,
    Ls,
}

impl Builtin {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "exit" => Some(Self::Exit),
            "ps" => Some(Self::Ps),
            "kill" => Some(Self::Kill),
            "ls" => Some(Self::Ls),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    ContainerRun {
        image: String,
        args: Vec<String>,
        detached: bool,
    },
    Builtin {
        cmd: Builtin,
        args: Vec<String>,
    },
    Exec {
        program: String,
        args: Vec<String>,
    },
}

/// Classifies one input line. Blank lines yield `None`; everything else
/// maps to exactly one classification, decided purely by the first token's
/// textual form. Tokenization splits on single spaces: no quoting, no
/// escaping, no globbing.
pub fn classify(line: &str) -> Option<Classification> {
    if line.trim().is_empty() {
        return None;
    }

    let mut tokens: Vec<&str> = line.split(' ').collect();
    let first = tokens[0];

    if first.len() > 2 && first.starts_with("./") {
        // The trailing `&` is meaningful only on the run path.
        let detached = tokens.last() == Some(&"&");
        if detached {
            tokens.pop();
        }
        return Some(Classification::ContainerRun {
            image: first[2..].to_string(),
            args: owned(&tokens[1..]),
            detached,
        });
    }

    if let Some(cmd) = Builtin::from_token(first) {
        return Some(Classification::Builtin {
            cmd,
            args: owned(&tokens[1..]),
        });
    }

    Some(Classification::Exec {
        program: first.to_string(),
        args: owned(&tokens[1..]),
    })
}

fn owned(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}
