//! JSON and C ABI entry points.
//!
//! The request body is a [`SolveRequest`]: an instance with an optional
//! `config` object.
//!
//! ```json
//! {
//!   "nodes": [{"id": "D", "demand": 0}, {"id": "A", "demand": 5}],
//!   "distance_matrix": {"D": {"A": 4.0}},
//!   "vehicle_capacity": 10,
//!   "config": {"infeasible": "fail"}
//! }
//! ```

use std::ffi::{CStr, CString};

use libc::c_char;
use serde::Serialize;

use crate::models::Solution;
use crate::request::SolveRequest;
use crate::Error;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn solve_request(body: &str) -> Result<Solution, Error> {
    let request: SolveRequest = serde_json::from_str(body)?;
    request.solve()
}

/// Solves a JSON request and returns the JSON array of routes.
///
/// # Examples
///
/// ```
/// let body = r#"{
///     "nodes": [{"id":"D","demand":0},{"id":"C","demand":3}],
///     "distance_matrix": {"D":{"C":2.5}},
///     "vehicle_capacity": 10
/// }"#;
/// let out = u_savings::ffi::solve_json(body)?;
/// assert_eq!(
///     out,
///     r#"[{"sequence":["D","C","D"],"total_distance":5.0,"total_load":3}]"#
/// );
/// # Ok::<(), u_savings::Error>(())
/// ```
pub fn solve_json(body: &str) -> Result<String, Error> {
    let routes = solve_request(body)?.into_routes();
    Ok(serde_json::to_string(&routes)?)
}

/// Solves a JSON request and returns `{"routes": [...], "unroutable": [...]}`.
pub fn solve_json_detailed(body: &str) -> Result<String, Error> {
    let solution = solve_request(body)?;
    Ok(serde_json::to_string(&solution)?)
}

fn into_c_string(json: String) -> *mut c_char {
    // serde_json escapes control characters, so the output has no interior NUL.
    CString::new(json).map_or(std::ptr::null_mut(), CString::into_raw)
}

fn error_json(message: String) -> String {
    serde_json::to_string(&ErrorBody { error: message })
        .unwrap_or_else(|_| r#"{"error":"unknown"}"#.to_string())
}

/// Solves a NUL-terminated JSON request.
///
/// Returns a newly allocated JSON string: the detailed solution on success,
/// or `{"error": "..."}` on failure. Returns null only if `input` is null.
/// The result must be released with [`u_savings_free_string`].
///
/// # Safety
///
/// `input` must be null or point to a valid NUL-terminated string that stays
/// alive for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn u_savings_solve_json(input: *const c_char) -> *mut c_char {
    if input.is_null() {
        return std::ptr::null_mut();
    }
    // SAFETY: non-null and NUL-terminated per the caller contract.
    let body = unsafe { CStr::from_ptr(input) };
    let json = match body.to_str() {
        Ok(body) => solve_json_detailed(body).unwrap_or_else(|e| error_json(e.to_string())),
        Err(e) => error_json(format!("input is not UTF-8: {e}")),
    };
    into_c_string(json)
}

/// Releases a string returned by [`u_savings_solve_json`].
///
/// # Safety
///
/// `ptr` must be null or a pointer previously returned by
/// [`u_savings_solve_json`] that has not been freed yet.
#[no_mangle]
pub unsafe extern "C" fn u_savings_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        // SAFETY: allocated by `CString::into_raw` in this module.
        drop(unsafe { CString::from_raw(ptr) });
    }
}
