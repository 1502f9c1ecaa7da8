use std::fmt::Display;

/// The closed set of static types the translator knows about.
///
/// `Clone` is a deep copy, so a type parsed once can be stamped onto several
/// parameters or declarations independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaticType {
    Integer,
    String,
    Bool,
    Array(Box<StaticType>),
    NoType,
}

impl StaticType {
    pub fn array_of(element: StaticType) -> Self {
        StaticType::Array(Box::new(element))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, StaticType::Array(_))
    }

    /// The element type of an array, `None` for everything else.
    pub fn element_type(&self) -> Option<&StaticType> {
        match self {
            StaticType::Array(element) => Some(element),
            _ => None,
        }
    }

    /// Name of the type in the emitted TypeScript.
    pub fn target_name(&self) -> String {
        match self {
            StaticType::Integer => String::from("number"),
            StaticType::String => String::from("string"),
            StaticType::Bool => String::from("boolean"),
            StaticType::Array(element) => format!("{}[]", element.target_name()),
            StaticType::NoType => String::from("void"),
        }
    }
}

/// Source spelling, used in tree dumps and error messages.
impl Display for StaticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StaticType::Integer => write!(f, "int"),
            StaticType::String => write!(f, "string"),
            StaticType::Bool => write!(f, "bool"),
            StaticType::Array(element) => write!(f, "[]{}", element),
            StaticType::NoType => write!(f, "none"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StaticType;

    #[test]
    fn test_target_names() {
        assert_eq!(StaticType::Integer.target_name(), "number");
        assert_eq!(StaticType::String.target_name(), "string");
        assert_eq!(StaticType::Bool.target_name(), "boolean");
        assert_eq!(StaticType::NoType.target_name(), "void");
        assert_eq!(StaticType::array_of(StaticType::Integer).target_name(), "number[]");
        assert_eq!(
            StaticType::array_of(StaticType::array_of(StaticType::String)).target_name(),
            "string[][]"
        );
    }

    #[test]
    fn test_clone_is_deep() {
        let original = StaticType::array_of(StaticType::Bool);
        let mut copy = original.clone();
        if let StaticType::Array(element) = &mut copy {
            **element = StaticType::Integer;
        }

        assert_eq!(original.element_type(), Some(&StaticType::Bool));
        assert_eq!(copy.element_type(), Some(&StaticType::Integer));
    }
}
