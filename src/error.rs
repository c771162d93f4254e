//! Error types for URDF parsing and scene construction.

use thiserror::Error;

/// Errors produced while parsing a URDF document or building the
/// kinematic tree from it.
#[derive(Debug, Error)]
pub enum UrdfError {
    /// The underlying XML could not be parsed.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// A required element was absent.
    #[error("missing required element: {element} in {context}")]
    MissingElement {
        /// Name of the element that was expected.
        element: &'static str,
        /// Where it was expected (e.g. the enclosing joint name).
        context: String,
    },

    /// A required attribute was absent.
    #[error("missing required attribute: {attribute} on {element}")]
    MissingAttribute {
        /// Name of the attribute that was expected.
        attribute: &'static str,
        /// The element it was expected on.
        element: String,
    },

    /// An attribute was present but its value could not be interpreted.
    #[error("invalid value for {attribute} on {element}: {message}")]
    InvalidAttribute {
        /// Name of the offending attribute.
        attribute: &'static str,
        /// The element it appears on.
        element: String,
        /// What went wrong.
        message: String,
    },

    /// A joint declared a type this crate does not recognize.
    #[error("unknown joint type: {0}")]
    UnknownJointType(String),

    /// A joint referenced a link that does not exist in the document.
    #[error("joint {joint} references undefined link {link}")]
    UndefinedLink {
        /// Name of the link that could not be found.
        link: String,
        /// Name of the joint holding the reference.
        joint: String,
    },

    /// Two links share a name (only reported in strict mode).
    #[error("duplicate link name: {0}")]
    DuplicateLink(String),

    /// Two joints share a name (only reported in strict mode).
    #[error("duplicate joint name: {0}")]
    DuplicateJoint(String),

    /// Reading the source file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl UrdfError {
    /// Creates a [`UrdfError::MissingElement`].
    pub fn missing_element(element: &'static str, context: impl Into<String>) -> Self {
        Self::MissingElement {
            element,
            context: context.into(),
        }
    }

    /// Creates a [`UrdfError::MissingAttribute`].
    pub fn missing_attribute(attribute: &'static str, element: impl Into<String>) -> Self {
        Self::MissingAttribute {
            attribute,
            element: element.into(),
        }
    }

    /// Creates a [`UrdfError::InvalidAttribute`].
    pub fn invalid_attribute(
        attribute: &'static str,
        element: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            attribute,
            element: element.into(),
            message: message.into(),
        }
    }

    /// Creates a [`UrdfError::UndefinedLink`].
    pub fn undefined_link(link: impl Into<String>, joint: impl Into<String>) -> Self {
        Self::UndefinedLink {
            link: link.into(),
            joint: joint.into(),
        }
    }
}

/// Convenience alias for results with [`UrdfError`].
pub type Result<T> = std::result::Result<T, UrdfError>;
