// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Process-level failure isolation (§5 "Failure isolation"): a raw signal
//! handler for the crash signals, installed once at startup. It writes a
//! short message to standard error and re-raises the signal so the
//! default disposition (core dump, process death) still applies — the
//! point is visibility, not recovery. The editor client observes the
//! exit and restarts the server with `restartFromCrash: true`.
//!
//! Async-signal-safety constrains this to `libc::write` and `libc::raise`
//! only: no allocation, no `tracing`, no locking.

const CRASH_MESSAGE: &[u8] = b"artic-lsp: fatal signal received, exiting\n";

extern "C" fn handle_crash_signal(signal: libc::c_int) {
    unsafe {
        libc::write(libc::STDERR_FILENO, CRASH_MESSAGE.as_ptr().cast(), CRASH_MESSAGE.len());
        libc::signal(signal, libc::SIG_DFL);
        libc::raise(signal);
    }
}

const CRASH_SIGNALS: &[libc::c_int] = &[libc::SIGSEGV, libc::SIGABRT, libc::SIGFPE, libc::SIGILL, libc::SIGBUS];

/// Installs `handle_crash_signal` for every signal in [`CRASH_SIGNALS`].
/// Safe to call once, at process startup, before the message loop starts.
pub fn install() {
    for &signal in CRASH_SIGNALS {
        unsafe {
            libc::signal(signal, handle_crash_signal as libc::sighandler_t);
        }
    }
}
