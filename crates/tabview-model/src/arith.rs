use std::fmt;
use std::str::FromStr;

/// Binary operation applied cell by cell after union alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Subtract,
}

impl ArithOp {
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Subtract => left - right,
        }
    }
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
        })
    }
}

impl FromStr for ArithOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" | "plus" | "+" => Ok(Self::Add),
            "subtract" | "sub" | "minus" | "-" => Ok(Self::Subtract),
            other => Err(format!("unknown operation '{other}'")),
        }
    }
}
