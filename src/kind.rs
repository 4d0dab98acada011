//! Node kinds.

use core::fmt;

/// Kind of a node.
///
/// The eight named kinds are the whole vocabulary two interoperating stores
/// share. [`NodeKind::Unknown`] carries a kind code this crate does not know
/// about; generic algorithms treat such nodes as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Null, i.e. no value.
    Null,
    /// Object with ordered key-value members.
    Object,
    /// Array with ordered elements.
    Array,
    /// String scalar.
    String,
    /// Signed integer scalar.
    Int,
    /// Unsigned integer scalar.
    Uint,
    /// Floating point scalar.
    Float,
    /// Boolean scalar.
    Bool,
    /// Kind code outside of the known set.
    Unknown(u32),
}

impl NodeKind {
    /// Returns the stable numeric code of the kind.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Null => 0,
            Self::Object => 1,
            Self::Array => 2,
            Self::String => 3,
            Self::Int => 4,
            Self::Uint => 5,
            Self::Float => 6,
            Self::Bool => 7,
            Self::Unknown(code) => code,
        }
    }

    /// Creates a kind from the numeric code.
    ///
    /// Codes outside of the known set become [`NodeKind::Unknown`].
    #[must_use]
    pub const fn from_code(code: u32) -> Self {
        match code {
            0 => Self::Null,
            1 => Self::Object,
            2 => Self::Array,
            3 => Self::String,
            4 => Self::Int,
            5 => Self::Uint,
            6 => Self::Float,
            7 => Self::Bool,
            code => Self::Unknown(code),
        }
    }

    /// Returns true if the node of the kind can have children.
    #[inline]
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Object | Self::Array)
    }

    /// Returns true if the kind is one of the scalar kinds.
    #[inline]
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::String | Self::Int | Self::Uint | Self::Float | Self::Bool
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Self::Null => "null",
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Unknown(code) => return write!(f, "unknown({})", code),
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::NodeKind;

    #[test]
    fn codes_are_stable() {
        let known = [
            NodeKind::Null,
            NodeKind::Object,
            NodeKind::Array,
            NodeKind::String,
            NodeKind::Int,
            NodeKind::Uint,
            NodeKind::Float,
            NodeKind::Bool,
        ];
        for (code, kind) in known.iter().enumerate() {
            assert_eq!(kind.code(), code as u32);
            assert_eq!(NodeKind::from_code(code as u32), *kind);
        }
        assert_eq!(NodeKind::from_code(8), NodeKind::Unknown(8));
        assert_eq!(NodeKind::Unknown(42).code(), 42);
    }
}
