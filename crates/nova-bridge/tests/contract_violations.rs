//! Contract violations end the host process. Each case re-runs this test
//! binary filtered to itself, with `NOVA_VIOLATION_CASE` telling the child to
//! make the bad call, and checks that the child aborted after logging.

use std::ffi::CString;
use std::process::Command;

use nova_engine::EngineConfig;
use nova_renderer as bridge;
use nova_wire::ChunkRenderObject;

const CASE_ENV: &str = "NOVA_VIOLATION_CASE";

/// In the child: runs `violate`. In the parent: spawns the child and checks
/// it died by abort with the violation on stderr.
fn assert_aborts(case: &str, expected: &str, violate: impl FnOnce()) {
    if std::env::var(CASE_ENV).as_deref() == Ok(case) {
        violate();
        return;
    }

    let exe = std::env::current_exe().unwrap();
    let out = Command::new(exe)
        .args([case, "--exact", "--nocapture", "--test-threads=1"])
        .env(CASE_ENV, case)
        .env("RUST_LOG", "error")
        .env("NOVA_HEADLESS", "1")
        .output()
        .unwrap();

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(!out.status.success(), "{case}: child returned normally\n{stderr}");

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        const SIGABRT: i32 = 6;
        assert_eq!(out.status.signal(), Some(SIGABRT), "{case}: {:?}\n{stderr}", out.status);
    }

    assert!(stderr.contains("bridge contract violation"), "{case}: no violation logged\n{stderr}");
    assert!(stderr.contains(expected), "{case}: expected `{expected}` in\n{stderr}");
}

#[test]
fn null_vertex_pointer_with_count_aborts() {
    assert_aborts(
        "null_vertex_pointer_with_count_aborts",
        "null pointer with non-zero length",
        || {
            bridge::initialize_with_config(EngineConfig::headless());
            let filter = CString::new("block").unwrap();
            let indices = [0i32, 1, 2];
            let obj = ChunkRenderObject {
                format: 0,
                x: 0.0,
                y: 0.0,
                z: 0.0,
                id: 1,
                vertex_data: std::ptr::null(),
                indices: indices.as_ptr(),
                vertex_buffer_size: 9,
                index_buffer_size: 3,
            };
            unsafe { bridge::add_chunk_geometry_for_filter(filter.as_ptr(), &obj) };
        },
    );
}

#[test]
fn frame_before_initialize_aborts() {
    assert_aborts("frame_before_initialize_aborts", "called before initialize()", || {
        bridge::execute_frame();
    });
}

#[test]
fn second_initialize_aborts() {
    assert_aborts("second_initialize_aborts", "already running", || {
        bridge::initialize_with_config(EngineConfig::headless());
        bridge::initialize_with_config(EngineConfig::headless());
    });
}
