//! OpenCV 相机与 HighGUI 窗口

use image::RgbImage;
use log::{info, warn};
use opencv::{
    core::{self, Mat, Scalar},
    highgui, imgproc,
    prelude::*,
    videoio::{self, VideoCapture},
};

use crate::device::{Camera, Display};
use crate::error::{DepthError, Result};
use crate::frame::Frame;

/// 基于 OpenCV VideoCapture 的相机，输出 BGR 帧
pub struct OpenCvCamera {
    capture: VideoCapture,
    index: i32,
    mat: Mat,
}

impl OpenCvCamera {
    /// 按设备索引打开相机
    pub fn open(index: i32) -> Result<Self> {
        let capture = VideoCapture::new(index, videoio::CAP_ANY)?;
        if capture.is_opened()? {
            info!("相机已打开: 设备 {}", index);
        } else {
            warn!("相机设备 {} 未能打开", index);
        }
        Ok(Self {
            capture,
            index,
            mat: Mat::default(),
        })
    }
}

impl Camera for OpenCvCamera {
    fn is_open(&self) -> bool {
        self.capture.is_opened().unwrap_or(false)
    }

    fn read_frame(&mut self) -> Result<Frame> {
        let grabbed = self.capture.read(&mut self.mat)?;
        if !grabbed || self.mat.empty() {
            return Ok(Frame::empty());
        }
        if self.mat.channels() != 3 {
            return Err(DepthError::Device(format!(
                "相机 {} 输出 {} 通道，需要 3 通道",
                self.index,
                self.mat.channels()
            )));
        }

        let size = self.mat.size()?;
        let data = if self.mat.is_continuous() {
            self.mat.data_bytes()?.to_vec()
        } else {
            self.mat.try_clone()?.data_bytes()?.to_vec()
        };
        Frame::new(size.width as u32, size.height as u32, data)
    }

    fn close(&mut self) {
        match self.capture.release() {
            Ok(()) => info!("相机设备 {} 已释放", self.index),
            Err(e) => warn!("释放相机设备 {} 失败: {}", self.index, e),
        }
    }
}

/// 把 RGB 图像转换为 OpenCV 使用的 BGR Mat
fn to_bgr_mat(image: &RgbImage) -> Result<Mat> {
    let (width, height) = image.dimensions();
    let mut rgb = Mat::new_rows_cols_with_default(
        height as i32,
        width as i32,
        core::CV_8UC3,
        Scalar::all(0.0),
    )?;
    rgb.data_bytes_mut()?.copy_from_slice(image.as_raw());

    let mut bgr = Mat::default();
    imgproc::cvt_color(&rgb, &mut bgr, imgproc::COLOR_RGB2BGR, 0)?;
    Ok(bgr)
}

/// HighGUI 窗口显示
#[derive(Default)]
pub struct HighGuiDisplay;

impl HighGuiDisplay {
    pub fn new() -> Self {
        Self
    }
}

impl Display for HighGuiDisplay {
    fn show(&mut self, window: &str, image: &RgbImage) -> Result<()> {
        let bgr = to_bgr_mat(image)?;
        highgui::imshow(window, &bgr)?;
        Ok(())
    }

    fn poll_key(&mut self, timeout_ms: i32) -> Result<Option<char>> {
        let key = highgui::wait_key(timeout_ms)?;
        if key < 0 {
            return Ok(None);
        }
        Ok(char::from_u32((key & 0xFF) as u32))
    }

    fn destroy_all_windows(&mut self) {
        if let Err(e) = highgui::destroy_all_windows() {
            warn!("关闭窗口失败: {}", e);
        }
    }
}
