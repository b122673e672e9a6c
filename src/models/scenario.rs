use std::fmt;

use super::MethodDescriptor;

/// A parameter pinned to a specific value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryTrigger {
    pub parameter: String,
    pub value: String,
}

/// What a scenario sets out to exercise
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioKind {
    /// Ordinary call with representative arguments
    HappyPath,
    /// One numeric parameter pinned to its boundary value
    BoundaryCase { parameter: String, value: String },
    /// The call is expected to throw `exception`
    ExceptionCase {
        exception: String,
        trigger: Option<BoundaryTrigger>,
    },
}

impl ScenarioKind {
    pub fn label(&self) -> &'static str {
        match self {
            ScenarioKind::HappyPath => "happy path",
            ScenarioKind::BoundaryCase { .. } => "boundary case",
            ScenarioKind::ExceptionCase { .. } => "exception case",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioKind::HappyPath => write!(f, "HappyPath"),
            ScenarioKind::BoundaryCase { parameter, value } => {
                write!(f, "BoundaryCase({}={})", parameter, value)
            }
            ScenarioKind::ExceptionCase { exception, trigger: None } => {
                write!(f, "ExceptionCase({})", exception)
            }
            ScenarioKind::ExceptionCase { exception, trigger: Some(t) } => {
                write!(f, "ExceptionCase({} when {}={})", exception, t.parameter, t.value)
            }
        }
    }
}

/// One planned test for a method. Borrows the method it was planned from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioDescriptor<'a> {
    pub method: &'a MethodDescriptor,
    pub kind: ScenarioKind,
    pub test_name: String,
}

impl<'a> ScenarioDescriptor<'a> {
    /// Value to pass for `parameter` in this scenario, if the scenario pins one
    pub fn pinned_value(&self, parameter: &str) -> Option<&str> {
        match &self.kind {
            ScenarioKind::BoundaryCase { parameter: p, value } if p == parameter => Some(value.as_str()),
            ScenarioKind::ExceptionCase { trigger: Some(t), .. } if t.parameter == parameter => {
                Some(t.value.as_str())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Parameter, Visibility};

    fn divide() -> MethodDescriptor {
        MethodDescriptor {
            name: "divide".to_string(),
            visibility: Visibility::Public,
            return_type: "int".to_string(),
            parameters: vec![Parameter::new("a", "int"), Parameter::new("b", "int")],
            declared_exceptions: vec![],
            is_static: false,
            signature: "public int divide(int a, int b)".to_string(),
        }
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ScenarioKind::HappyPath.to_string(), "HappyPath");
        let boundary = ScenarioKind::BoundaryCase {
            parameter: "a".to_string(),
            value: "0".to_string(),
        };
        assert_eq!(boundary.to_string(), "BoundaryCase(a=0)");
        let elevated = ScenarioKind::ExceptionCase {
            exception: "ArithmeticException".to_string(),
            trigger: Some(BoundaryTrigger { parameter: "b".to_string(), value: "0".to_string() }),
        };
        assert_eq!(elevated.to_string(), "ExceptionCase(ArithmeticException when b=0)");
    }

    #[test]
    fn test_pinned_value() {
        let method = divide();
        let scenario = ScenarioDescriptor {
            method: &method,
            kind: ScenarioKind::ExceptionCase {
                exception: "ArithmeticException".to_string(),
                trigger: Some(BoundaryTrigger { parameter: "b".to_string(), value: "0".to_string() }),
            },
            test_name: "testDivideThrowsArithmeticException".to_string(),
        };
        assert_eq!(scenario.pinned_value("b"), Some("0"));
        assert_eq!(scenario.pinned_value("a"), None);
    }
}
