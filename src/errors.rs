//! Errors that may occur when resolving, querying or persisting controls

use derive_more::{Display, Error};

/// Authored control data could not be turned into a [`ControlTable`](crate::control_table::ControlTable)
///
/// These are fatal at load time: resolution stops at the first offending control,
/// and no partially resolved table is ever produced.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ConfigurationError {
    /// A key or joystick button field names an input that does not exist
    #[display(fmt = "control `{}` refers to unknown input `{}`", control, key)]
    UnknownKey {
        /// The control that failed to resolve
        control: String,
        /// The unresolvable name, as authored
        key: String,
    },
    /// A bidirectional axis was authored without a link name
    #[display(fmt = "bidirectional control `{}` has no link name", control)]
    MissingLinkName {
        /// The control that failed to resolve
        control: String,
    },
    /// More than one other bidirectional axis shares this control's link name
    #[display(fmt = "control `{}` has more than one partner linked as `{}`", control, link)]
    TooManyLinks {
        /// The control that failed to resolve
        control: String,
        /// The shared link name
        link: String,
    },
    /// Both halves of a bidirectional pair point in the same direction
    #[display(
        fmt = "control `{}` and its partner linked as `{}` have the same direction",
        control,
        link
    )]
    SameDirection {
        /// The control that failed to resolve
        control: String,
        /// The shared link name
        link: String,
    },
}

/// A control was queried or edited by a name that is not in the control table
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display(fmt = "no control named `{}` is configured", name)]
pub struct UnconfiguredControl {
    /// The name that was looked up
    pub name: String,
}

/// A control table could not be encoded into a persisted blob
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum PersistenceError {
    /// A text field contains one of the separator characters
    #[display(fmt = "control `{}` has a field containing a reserved character: `{}`", control, value)]
    ReservedCharacter {
        /// The control being encoded
        control: String,
        /// The offending field value
        value: String,
    },
}

/// Persisted data could not be loaded
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum LoadError {
    /// Nothing was saved under this key: callers should keep their defaults
    #[display(fmt = "no saved data found under `{}`", key)]
    Missing {
        /// The preference key that was read
        key: String,
    },
    /// The saved definitions decoded, but do not form a valid control table
    #[display(fmt = "saved definitions are invalid: {}", _0)]
    Invalid(ConfigurationError),
}
