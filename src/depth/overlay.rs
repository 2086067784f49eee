use image::RgbImage;
use raqote::{DrawOptions, DrawTarget, PathBuilder, SolidSource, Source};

use crate::config::{FPS_TEXT_COLOR, FPS_TEXT_ORIGIN, FPS_TEXT_SCALE};

const GLYPH_WIDTH: usize = 5;
const GLYPH_HEIGHT: usize = 7;
const GLYPH_ADVANCE: usize = GLYPH_WIDTH + 1;

/// 5x7 点阵字形
///
/// 返回 7 行，自上而下；每行只用低 5 位，最高的第 4 位是最左列，
/// 置 1 的位绘制为一个 `scale` x `scale` 的方块。
/// 仅包含 FPS 标签用到的字符，其余字符返回 None。
fn glyph(c: char) -> Option<[u8; GLYPH_HEIGHT]> {
    let rows = match c {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        ':' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000],
        ' ' => [0; GLYPH_HEIGHT],
        _ => return None,
    };
    Some(rows)
}

/// FPS 标签文字
pub fn fps_label(fps: u32) -> String {
    format!("FPS: {}", fps)
}

/// 在图像上绘制文字
///
/// `origin` 为文字左下角（基线）坐标，字形按 `scale` 倍放大。
/// 不支持的字符直接跳过。
///
/// # 参数
/// * `image` - 原始图像
/// * `text` - 文字内容
/// * `origin` - 基线左端坐标
/// * `scale` - 点阵放大倍数
/// * `color` - RGB 颜色
///
/// # 返回值
/// 返回绘制了文字的新图像，尺寸不变
pub fn draw_text(image: &RgbImage, text: &str, origin: (f32, f32), scale: f32, color: [u8; 3]) -> RgbImage {
    let (img_width, img_height) = image.dimensions();
    let mut dt = DrawTarget::new(img_width as i32, img_height as i32);

    // 将原始图像逐像素拷贝到DrawTarget上（不透明，无需预乘）
    for (dst, pixel) in dt.get_data_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b] = pixel.0;
        *dst = u32::from_le_bytes([b, g, r, 0xFF]);
    }

    let top = origin.1 - GLYPH_HEIGHT as f32 * scale;
    let mut pb = PathBuilder::new();
    for (i, c) in text.chars().enumerate() {
        let Some(rows) = glyph(c) else {
            continue;
        };
        let left = origin.0 + (i * GLYPH_ADVANCE) as f32 * scale;
        for (row, &bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1u8 << (GLYPH_WIDTH - 1 - col)) != 0 {
                    pb.rect(
                        left + col as f32 * scale,
                        top + row as f32 * scale,
                        scale,
                        scale,
                    );
                }
            }
        }
    }
    let path = pb.finish();

    let [r, g, b] = color;
    dt.fill(
        &path,
        &Source::Solid(SolidSource { r, g, b, a: 0xFF }),
        &DrawOptions::new(),
    );

    // 将DrawTarget转换回图像
    let pixels: Vec<u8> = dt
        .get_data()
        .iter()
        .flat_map(|&pixel| {
            let bytes = pixel.to_le_bytes();
            [bytes[2], bytes[1], bytes[0]]
        })
        .collect();

    RgbImage::from_raw(img_width, img_height, pixels).unwrap_or_else(|| image.clone())
}

/// 在固定位置叠加 FPS 计数
pub fn draw_fps(image: &RgbImage, fps: u32) -> RgbImage {
    draw_text(
        image,
        &fps_label(fps),
        FPS_TEXT_ORIGIN,
        FPS_TEXT_SCALE,
        FPS_TEXT_COLOR,
    )
}
