mod common;

use common::{EchoRuntime, RecordingDisplay, ScriptedCamera};
use depthcam::config::WINDOW_NAME;
use depthcam::{CaptureLoop, DepthError, InferenceEngine, LoopSignal, LoopState, ModelConfig};

fn capture_loop(
    camera: ScriptedCamera,
    display: RecordingDisplay,
    runtime: EchoRuntime,
) -> CaptureLoop<ScriptedCamera, RecordingDisplay, EchoRuntime> {
    CaptureLoop::new(
        camera,
        display,
        InferenceEngine::new(runtime),
        ModelConfig::select(true),
    )
}

#[test]
fn test_empty_fifth_frame_ends_stream() {
    let mut capture = capture_loop(
        ScriptedCamera::with_frames_then_empty(4, 64, 48),
        RecordingDisplay::default(),
        EchoRuntime::constant(10.0),
    );
    assert_eq!(capture.state(), LoopState::Opening);

    let report = capture.run().unwrap();

    assert_eq!(report.frames, 4);
    assert_eq!(report.exit, LoopSignal::StreamEnded);
    assert_eq!(capture.state(), LoopState::Closed);
    assert_eq!(capture.camera().reads, 5);
    assert_eq!(capture.camera().close_calls, 1);
    assert_eq!(capture.display().destroy_calls, 1);
    assert_eq!(capture.display().shown.len(), 4);
    for (window, image) in &capture.display().shown {
        assert_eq!(window, WINDOW_NAME);
        assert_eq!(image.dimensions(), (64, 48));
    }
}

#[test]
fn test_output_name_resolved_once_across_frames() {
    let mut capture = capture_loop(
        ScriptedCamera::with_frames_then_empty(12, 32, 32),
        RecordingDisplay::default(),
        EchoRuntime::constant(1.0),
    );
    capture.run().unwrap();

    let runtime = capture.engine().runtime();
    assert_eq!(runtime.forward_calls, 12);
    assert_eq!(runtime.name_calls.get(), 1);
    assert!(runtime.used_outputs.iter().all(|name| name == "depth"));
    assert_eq!(capture.engine().output_name(), Some("depth"));
}

#[test]
fn test_quit_key_stops_loop() {
    let display = RecordingDisplay::with_keys(vec![None, Some('x'), Some('q'), None]);
    let mut capture = capture_loop(
        ScriptedCamera::with_frames_then_empty(10, 16, 16),
        display,
        EchoRuntime::constant(2.0),
    );

    let report = capture.run().unwrap();

    assert_eq!(report.exit, LoopSignal::StopRequested);
    assert_eq!(report.frames, 3);
    assert_eq!(capture.camera().reads, 3);
    assert_eq!(capture.camera().close_calls, 1);
    assert_eq!(capture.display().destroy_calls, 1);
}

#[test]
fn test_inference_failure_still_releases_devices() {
    let mut capture = capture_loop(
        ScriptedCamera::with_frames_then_empty(5, 16, 16),
        RecordingDisplay::default(),
        EchoRuntime::constant(2.0).failing_on(3),
    );

    let err = capture.run().unwrap_err();

    assert!(matches!(err, DepthError::Runtime(_)));
    assert_eq!(capture.frames(), 2);
    assert_eq!(capture.state(), LoopState::Closed);
    assert_eq!(capture.camera().close_calls, 1);
    assert_eq!(capture.display().destroy_calls, 1);
}

#[test]
fn test_closed_camera_processes_nothing() {
    let mut camera = ScriptedCamera::with_frames_then_empty(3, 16, 16);
    camera.open = false;
    let mut capture = capture_loop(camera, RecordingDisplay::default(), EchoRuntime::constant(1.0));

    let report = capture.run().unwrap();

    assert_eq!(report.frames, 0);
    assert_eq!(report.exit, LoopSignal::StreamEnded);
    assert_eq!(capture.camera().reads, 0);
    assert_eq!(capture.engine().runtime().name_calls.get(), 0);
}

#[test]
fn test_release_happens_exactly_once() {
    let mut capture = capture_loop(
        ScriptedCamera::with_frames_then_empty(1, 16, 16),
        RecordingDisplay::default(),
        EchoRuntime::constant(1.0),
    );
    capture.run().unwrap();
    capture.close();
    let report = capture.run().unwrap();

    assert_eq!(report.exit, LoopSignal::StreamEnded);
    assert_eq!(capture.camera().close_calls, 1);
    assert_eq!(capture.display().destroy_calls, 1);
}

#[test]
fn test_metrics_recorded_per_frame() {
    let mut capture = capture_loop(
        ScriptedCamera::with_frames_then_empty(2, 16, 16),
        RecordingDisplay::default(),
        EchoRuntime::constant(1.0),
    );
    assert!(capture.last_metrics().is_none());

    assert_eq!(capture.step().unwrap(), LoopSignal::Continue);
    let metrics = capture.last_metrics().unwrap();
    assert!(metrics.elapsed_seconds >= 0.0);
    assert_eq!(capture.frames(), 1);
}
