//! Owner name resolution.
//!
//! Maps the numeric uid stored in file metadata to a user name using the
//! reentrant `getpwuid_r`. A uid without a passwd entry is reported as its
//! decimal string, so resolution never fails a scan.

use dashmap::DashMap;
use libc::{c_char, getpwuid_r, passwd, uid_t};
use std::ffi::CStr;
use std::mem::MaybeUninit;
use tracing::debug;

/// Initial buffer handed to `getpwuid_r`; doubled on `ERANGE`.
const PWD_BUF_INITIAL: usize = 4096;
const PWD_BUF_MAX: usize = 1 << 20;

/// Per-scan uid → user name cache shared by all workers.
///
/// Each scan builds its own resolver, so names never leak between runs.
#[derive(Debug, Default)]
pub struct OwnerResolver {
    cache: DashMap<u32, String>,
}

impl OwnerResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the user name for `uid`, or `uid` as a string when it has none.
    pub fn resolve(&self, uid: u32) -> String {
        if let Some(name) = self.cache.get(&uid) {
            return name.clone();
        }

        let name = lookup_user_name(uid).unwrap_or_else(|| {
            debug!("no passwd entry for uid {}, using the numeric id", uid);
            uid.to_string()
        });

        self.cache.entry(uid).or_insert(name).clone()
    }

    /// Number of distinct uids resolved so far.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

/// Looks up the passwd entry for `uid`.
///
/// # Returns
/// * `Some(name)` - The login name
/// * `None` - No entry exists, the lookup failed, or the name is not UTF-8
fn lookup_user_name(uid: u32) -> Option<String> {
    let mut buf_len = PWD_BUF_INITIAL;

    loop {
        let mut pwd = MaybeUninit::<passwd>::uninit();
        let mut buf = vec![0u8; buf_len];
        let mut result: *mut passwd = std::ptr::null_mut();

        let ret = unsafe {
            getpwuid_r(
                uid as uid_t,
                pwd.as_mut_ptr(),
                buf.as_mut_ptr() as *mut c_char,
                buf.len(),
                &mut result,
            )
        };

        if ret == libc::ERANGE && buf_len < PWD_BUF_MAX {
            buf_len *= 2;
            continue;
        }

        if ret != 0 || result.is_null() {
            return None;
        }

        // `result` points into `pwd`, whose strings live in `buf`; both are
        // still alive here.
        return unsafe {
            let pw_name = (*result).pw_name;
            if pw_name.is_null() {
                return None;
            }
            CStr::from_ptr(pw_name).to_str().ok().map(String::from)
        };
    }
}
