use std::io::{Read, Write};

use sms_resource_core::contract::{parse_in_request, stable_contract_json};
use sms_resource_core::error::ResourceError;

use super::{report_failure, write_stdout, RunStatus};

/// Echoes the requested version back. The resource fetches nothing, so the
/// destination directory is left untouched.
pub fn handle_in(stdin: impl Read, mut stdout: impl Write, mut stderr: impl Write) -> RunStatus {
    match resolve_version(stdin).and_then(|body| write_stdout(&mut stdout, &body)) {
        Ok(()) => RunStatus::Success,
        Err(error) => report_failure(&mut stderr, &error),
    }
}

fn resolve_version(mut stdin: impl Read) -> Result<String, ResourceError> {
    let mut raw = Vec::new();
    stdin
        .read_to_end(&mut raw)
        .map_err(ResourceError::ReadStdin)?;
    let response = parse_in_request(&raw)?;
    stable_contract_json(response)
}
