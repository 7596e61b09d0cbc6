//! C-ABI wrapper around `netlib-core`.
//!
//! # Overview
//! Exposes the sans-IO `ApiClient` through `extern "C"` functions so a
//! mobile host can build requests and parse responses while running the
//! HTTP exchange on its own network stack.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - `build_*` / `parse_*` mirror the core API 1:1.
//! - A single `FfiApiResult` envelope with `FfiDataTag` + `void* data`
//!   conveys success payloads and errors uniformly.
//! - The caller owns all returned pointers and must release them with the
//!   matching `netlib_free_*` function.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use netlib_core::http::HttpResponse;
use netlib_core::BaseUrl;

use types::*;

/// Borrow a C string as UTF-8. `None` for null or invalid UTF-8.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
unsafe fn read_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `ApiClient` bound to `base_url`.
///
/// Returns null if `base_url` is null, not UTF-8, or not an absolute
/// http(s) URL. Free the result with `netlib_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn netlib_client_new(base_url: *const c_char) -> *mut FfiApiClient {
    catch_unwind(|| {
        let Some(url) = (unsafe { read_str(base_url) }) else {
            return std::ptr::null_mut();
        };
        match BaseUrl::parse(url) {
            Ok(base) => Box::into_raw(Box::new(FfiApiClient {
                inner: netlib_core::ApiClient::new(base),
            })),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `netlib_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn netlib_client_free(client: *mut FfiApiClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build a POST of `json` to `base + endpoint`.
///
/// `json` must be valid JSON text; it is re-encoded compactly. Returns null
/// if any argument is null, `endpoint` is empty, or `json` does not parse.
/// Free the result with `netlib_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn netlib_build_post_json(
    client: *const FfiApiClient,
    endpoint: *const c_char,
    json: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let (Some(endpoint), Some(json)) = (unsafe { read_str(endpoint) }, unsafe { read_str(json) }) else {
            return std::ptr::null_mut();
        };
        let payload: serde_json::Value = match serde_json::from_str(json) {
            Ok(v) => v,
            Err(_) => return std::ptr::null_mut(),
        };
        match client.inner.build_post_json(endpoint, &payload) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build a GET of `base + endpoint + suffix`. A null `suffix` is treated as
/// empty.
///
/// Returns null if `client` or `endpoint` is null or `endpoint` is empty.
#[unsafe(no_mangle)]
pub extern "C" fn netlib_build_get(
    client: *const FfiApiClient,
    endpoint: *const c_char,
    suffix: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let Some(endpoint) = (unsafe { read_str(endpoint) }) else {
            return std::ptr::null_mut();
        };
        let suffix = if suffix.is_null() {
            ""
        } else {
            match unsafe { read_str(suffix) } {
                Some(s) => s,
                None => return std::ptr::null_mut(),
            }
        };
        match client.inner.build_get(endpoint, suffix) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Convert an `FfiHttpResponse` to a core `HttpResponse`.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() {
        None
    } else {
        Some(
            unsafe { CStr::from_ptr(resp.body) }
                .to_string_lossy()
                .into_owned(),
        )
    };
    HttpResponse::new(resp.status, body)
}

/// Parse the response to a POST.
///
/// `error_code = Ok` for any 2xx status, `Http` otherwise.
#[unsafe(no_mangle)]
pub extern "C" fn netlib_parse_post(
    client: *const FfiApiClient,
    response: *const FfiHttpResponse,
) -> *mut FfiApiResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiApiResult::null_arg("client");
        }
        if response.is_null() {
            return FfiApiResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        let status = resp.status;
        match client.inner.parse_post(ffi_response_to_core(resp)) {
            Ok(_) => FfiApiResult::ok_empty(status),
            Err(e) => FfiApiResult::from_error(e, status),
        }
    })
    .unwrap_or_else(|_| FfiApiResult::panic("panic in netlib_parse_post"))
}

/// Parse the response to a GET.
///
/// On success `data_tag` is `Body` with the JSON text in `data`, or `None`
/// when the response carried no body.
#[unsafe(no_mangle)]
pub extern "C" fn netlib_parse_get(
    client: *const FfiApiClient,
    response: *const FfiHttpResponse,
) -> *mut FfiApiResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiApiResult::null_arg("client");
        }
        if response.is_null() {
            return FfiApiResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        let status = resp.status;
        match client.inner.parse_get(ffi_response_to_core(resp)) {
            Ok(result) => FfiApiResult::ok_get(status, result),
            Err(e) => FfiApiResult::from_error(e, status),
        }
    })
    .unwrap_or_else(|_| FfiApiResult::panic("panic in netlib_parse_get"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `netlib_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn netlib_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        if !req.url.is_null() {
            drop(unsafe { CString::from_raw(req.url) });
        }
        if !req.body.is_null() {
            drop(unsafe { CString::from_raw(req.body) });
        }
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                if !h.key.is_null() {
                    drop(unsafe { CString::from_raw(h.key) });
                }
                if !h.value.is_null() {
                    drop(unsafe { CString::from_raw(h.value) });
                }
            }
        }
    });
}

/// Free an `FfiApiResult` returned by any `netlib_parse_*` function.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn netlib_free_result(result: *mut FfiApiResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if !result.data.is_null() {
            match result.data_tag {
                FfiDataTag::Body => drop(unsafe { CString::from_raw(result.data as *mut c_char) }),
                FfiDataTag::None => {}
            }
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn netlib_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
