// Finish-reason mapping from gateway strings to the generic enumeration.

use gateway_transform_types::FinishReason;

/// Map a gateway finish-reason string to the generic enumeration.
///
/// Total over the input domain: unrecognized strings and absence both map
/// to `Unknown`, never an error.
pub(crate) fn map_finish_reason(reason: Option<&str>) -> FinishReason {
    match reason {
        Some("stop") => FinishReason::Stop,
        Some("length") | Some("max_tokens") => FinishReason::Length,
        Some("content_filter") => FinishReason::ContentFilter,
        Some("tool_calls") | Some("function_call") => FinishReason::ToolCalls,
        _ => FinishReason::Unknown,
    }
}
