//! Invoice image rendering.
//!
//! An invoice is the background template with the member's details drawn at fixed
//! positions, a status badge, and a best-effort social media overlay in the bottom-right
//! corner. Output is an RGB JPEG named after the member id, overwritten on every render.

pub mod font;

use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::NaiveDate;
use image::{
    codecs::jpeg::JpegEncoder, imageops::FilterType, DynamicImage, ImageError, Rgba, RgbaImage,
};
use imageproc::{drawing::draw_filled_rect_mut, rect::Rect};

use crate::server::{
    error::invoice::InvoiceError,
    service::invoice::font::InvoiceFont,
    util::time::{membership_status, to_display_date},
};

const JPEG_QUALITY: u8 = 95;

const NAME_POS: (i32, i32) = (150, 360);
const MOBILE_POS: (i32, i32) = (150, 420);
const DETAIL_ROW_Y: i32 = 980;
const PLAN_X: i32 = 200;
const PACKAGE_X: i32 = 600;
const JOINED_X: i32 = 1150;
const END_X: i32 = 1600;
const BADGE_X: i32 = 2000;
const BADGE_WIDTH: u32 = 350;
const BADGE_HEIGHT: u32 = 70;

const VALUE_SIZE: f32 = 40.0;
const LABEL_SIZE: f32 = 36.0;

const LOGO_SIZE: u32 = 70;
const OVERLAY_PADDING: u32 = 60;
const HANDLE_OFFSET_X: i32 = 420;
const HANDLE_LINE_HEIGHT: i32 = 48;
const SOCIAL_HANDLES: [&str; 2] = ["@fitankeshparmar", "@extremegymmadhuram"];

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BADGE_RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// File locations used by the renderer.
#[derive(Clone, Debug)]
pub struct InvoiceConfig {
    pub template_path: PathBuf,
    pub logo_path: PathBuf,
    pub font_path: PathBuf,
    /// Directory invoices are written to, created on demand
    pub output_dir: PathBuf,
}

#[derive(Clone)]
pub struct InvoiceRenderer {
    config: Arc<InvoiceConfig>,
    font: Arc<InvoiceFont>,
}

impl InvoiceRenderer {
    /// Creates a renderer, loading the font once.
    pub fn new(config: InvoiceConfig) -> Self {
        let font = InvoiceFont::load(&config.font_path);

        Self {
            config: Arc::new(config),
            font: Arc::new(font),
        }
    }

    /// Where the invoice for `member_id` is written.
    pub fn output_path(&self, member_id: i32) -> PathBuf {
        self.config
            .output_dir
            .join(format!("invoice_{}.jpg", member_id))
    }

    /// Renders on the blocking thread pool and returns the written path.
    pub async fn render(
        &self,
        member: entity::member::Model,
        today: NaiveDate,
    ) -> Result<PathBuf, InvoiceError> {
        let renderer = self.clone();

        tokio::task::spawn_blocking(move || renderer.render_blocking(&member, today)).await?
    }

    /// Renders the invoice for `member` as of `today`.
    ///
    /// # Returns
    /// - `Ok(PathBuf)` - Path of the written JPEG
    /// - `Err(InvoiceError::Template)` - The template image is missing or not decodable
    /// - `Err(InvoiceError::OutputDir)` / `Err(InvoiceError::Encode)` - The output could not be written
    pub fn render_blocking(
        &self,
        member: &entity::member::Model,
        today: NaiveDate,
    ) -> Result<PathBuf, InvoiceError> {
        let template_path = &self.config.template_path;
        let mut canvas = image::open(template_path)
            .map_err(|source| InvoiceError::Template {
                path: template_path.display().to_string(),
                source,
            })?
            .to_rgba8();

        self.draw_details(&mut canvas, member, today);

        if let Err(e) = self.draw_social_overlay(&mut canvas) {
            tracing::warn!(
                member_id = %member.id,
                path = %self.config.logo_path.display(),
                error = %e,
                "Skipping invoice logo overlay"
            );
        }

        let output_path = self.output_path(member.id);
        self.write_jpeg(canvas, &output_path)?;

        tracing::debug!(member_id = %member.id, path = %output_path.display(), "Rendered invoice");

        Ok(output_path)
    }

    fn draw_details(&self, canvas: &mut RgbaImage, member: &entity::member::Model, today: NaiveDate) {
        let font = &self.font;

        font.draw_text(canvas, BLACK, NAME_POS.0, NAME_POS.1, VALUE_SIZE, &member.name);
        font.draw_text(
            canvas,
            BLACK,
            MOBILE_POS.0,
            MOBILE_POS.1,
            LABEL_SIZE,
            &format!("Mobile: {}", member.mobile),
        );

        let y = DETAIL_ROW_Y;
        font.draw_text(canvas, BLACK, PLAN_X, y, VALUE_SIZE, &member.plan);
        font.draw_text(canvas, BLACK, PACKAGE_X, y, VALUE_SIZE, &member.package);
        font.draw_text(
            canvas,
            BLACK,
            JOINED_X,
            y,
            VALUE_SIZE,
            &to_display_date(&member.joined_date),
        );
        font.draw_text(
            canvas,
            BLACK,
            END_X,
            y,
            VALUE_SIZE,
            &to_display_date(&member.end_date),
        );

        let status = membership_status(&member.end_date, today);
        draw_filled_rect_mut(
            canvas,
            Rect::at(BADGE_X, y).of_size(BADGE_WIDTH, BADGE_HEIGHT),
            BADGE_RED,
        );
        font.draw_text(canvas, WHITE, BADGE_X + 20, y + 10, VALUE_SIZE, status.label());
    }

    /// Pastes the logo and the two handle lines in the bottom-right corner.
    fn draw_social_overlay(&self, canvas: &mut RgbaImage) -> Result<(), ImageError> {
        let logo = image::open(&self.config.logo_path)?
            .resize_exact(LOGO_SIZE, LOGO_SIZE, FilterType::Triangle)
            .to_rgba8();

        let logo_x = canvas.width().saturating_sub(LOGO_SIZE + OVERLAY_PADDING) as i64;
        let logo_y = canvas.height().saturating_sub(LOGO_SIZE + OVERLAY_PADDING) as i64;

        image::imageops::overlay(canvas, &logo, logo_x, logo_y);

        self.font.draw_lines(
            canvas,
            BLACK,
            logo_x as i32 - HANDLE_OFFSET_X,
            logo_y as i32 + 5,
            VALUE_SIZE,
            HANDLE_LINE_HEIGHT,
            &SOCIAL_HANDLES,
        );

        Ok(())
    }

    fn write_jpeg(&self, canvas: RgbaImage, path: &Path) -> Result<(), InvoiceError> {
        let output_dir = &self.config.output_dir;
        std::fs::create_dir_all(output_dir).map_err(|source| InvoiceError::OutputDir {
            path: output_dir.display().to_string(),
            source,
        })?;

        let encode_err = |source: ImageError| InvoiceError::Encode {
            path: path.display().to_string(),
            source,
        };

        let rgb = DynamicImage::ImageRgba8(canvas).to_rgb8();
        let file = File::create(path).map_err(|e| encode_err(ImageError::IoError(e)))?;
        let encoder = JpegEncoder::new_with_quality(BufWriter::new(file), JPEG_QUALITY);
        rgb.write_with_encoder(encoder).map_err(encode_err)?;

        Ok(())
    }
}
