//! Types shared by the endpoint facades.

pub mod message;
pub mod tool;
pub mod usage;

pub use message::{ContentPart, ImageUrl, Message, MessageContent, Role};
pub use tool::{FunctionCall, FunctionDefinition, Tool, ToolCall, WebSearchTool};
pub use usage::{CompletionUsage, SensitiveWordCheck};

use serde::{Deserialize, Deserializer};

/// Field deserializer that reads an explicit JSON `null` as `T::default()`.
///
/// `#[serde(default)]` alone only covers a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
