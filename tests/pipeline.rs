mod common;

use common::EchoRuntime;
use depthcam::config::MEAN_RGB;
use depthcam::depth::colormap::JET;
use depthcam::{Frame, InferenceEngine, ModelConfig, draw_fps, postprocess, preprocess};

#[test]
fn test_small_model_gray_frame_end_to_end() {
    let cfg = ModelConfig::select(true);
    // 480 行 x 640 列的灰度帧
    let frame = Frame::filled(640, 480, [128, 128, 128]);

    let tensor = preprocess(&frame, &cfg).unwrap();
    assert_eq!(tensor.shape(), &[1, 3, 256, 256]);
    for c in 0..3 {
        let expected = (128.0 - MEAN_RGB[c]) / 255.0;
        let channel = tensor.index_axis(ndarray::Axis(1), c);
        assert!(
            channel.iter().all(|&v| (v - expected).abs() < 1e-5),
            "channel {c} not uniform at {expected}"
        );
    }

    let mut engine = InferenceEngine::new(EchoRuntime::constant(10.0));
    let raw = engine.forward(&tensor).unwrap();
    assert_eq!(raw.shape(), &[1, 256, 256]);

    let image = postprocess(&raw, frame.dimensions()).unwrap();
    assert_eq!(image.dimensions(), (640, 480));
    let first = *image.get_pixel(0, 0);
    assert!(image.pixels().all(|p| *p == first));
    assert_eq!(first, JET.lookup(0));
}

#[test]
fn test_large_model_output_matches_frame_not_network() {
    let cfg = ModelConfig::select(false);
    let frame = Frame::filled(1280, 720, [30, 60, 90]);

    let tensor = preprocess(&frame, &cfg).unwrap();
    assert_eq!(tensor.shape(), &[1, 3, 384, 384]);

    let mut engine = InferenceEngine::new(EchoRuntime::constant(3.5));
    let raw = engine.forward(&tensor).unwrap();
    let image = postprocess(&raw, frame.dimensions()).unwrap();
    assert_eq!(image.dimensions(), (1280, 720));
}

#[test]
fn test_fps_overlay_on_depth_image() {
    let raw = depthcam::DepthTensor::from_shape_vec(&[1, 8, 8], vec![5.0; 64]).unwrap();
    let image = postprocess(&raw, (320, 240)).unwrap();
    let labelled = draw_fps(&image, 2);

    assert_eq!(labelled.dimensions(), image.dimensions());
    assert_ne!(labelled, image);
    // 文字区域之外保持原样
    assert_eq!(labelled.get_pixel(300, 200), image.get_pixel(300, 200));
}
