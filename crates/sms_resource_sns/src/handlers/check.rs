use std::io::Write;

use sms_resource_core::contract::stable_contract_json;

use super::{report_failure, write_stdout, RunStatus};

/// The resource emits no versions of its own, so every check reports an
/// empty list.
pub fn handle_check(mut stdout: impl Write, mut stderr: impl Write) -> RunStatus {
    let versions: [serde_json::Value; 0] = [];
    match stable_contract_json(versions).and_then(|body| write_stdout(&mut stdout, &body)) {
        Ok(()) => RunStatus::Success,
        Err(error) => report_failure(&mut stderr, &error),
    }
}
