//! AVIF decoding via `avif-parse` (container) and `rav1d` (AV1 payload).
//!
//! The `image` crate can only decode AVIF through the C library dav1d, so
//! this module drives rav1d, the pure Rust port, directly and converts its
//! YUV output to RGB8 with BT.601 coefficients.

use super::backend::BackendError;
use image::{DynamicImage, Rgb, RgbImage};
use rav1d::include::dav1d::data::Dav1dData;
use rav1d::include::dav1d::dav1d::Dav1dSettings;
use rav1d::include::dav1d::headers::{
    DAV1D_PIXEL_LAYOUT_I400, DAV1D_PIXEL_LAYOUT_I420, DAV1D_PIXEL_LAYOUT_I422,
    DAV1D_PIXEL_LAYOUT_I444,
};
use rav1d::include::dav1d::picture::Dav1dPicture;
use rav1d::src::lib as dav1d;
use std::mem::MaybeUninit;
use std::path::Path;
use std::ptr::NonNull;

/// Owns an FFI handle and runs `release` on it when dropped.
struct Release<T, F: FnMut(&mut T)> {
    handle: T,
    release: F,
}

impl<T, F: FnMut(&mut T)> Release<T, F> {
    fn new(handle: T, release: F) -> Self {
        Self { handle, release }
    }
}

impl<T, F: FnMut(&mut T)> Drop for Release<T, F> {
    fn drop(&mut self) {
        (self.release)(&mut self.handle);
    }
}

fn failed(what: &str, code: i32) -> BackendError {
    BackendError::ProcessingFailed(format!("rav1d {what} failed ({code})"))
}

/// One plane of decoded samples. 8-bit planes hold `u8`, deeper ones `u16`.
#[derive(Clone, Copy)]
struct Plane {
    ptr: *const u8,
    stride: isize,
}

impl Plane {
    /// # Safety
    ///
    /// `(x, y)` must lie inside the plane the decoder produced, and the
    /// picture backing `ptr` must still be referenced.
    unsafe fn sample(self, x: u32, y: u32, bpc: u32) -> f32 {
        let row = y as isize * self.stride;
        if bpc <= 8 {
            unsafe { *self.ptr.offset(row + x as isize) as f32 }
        } else {
            let p = unsafe { self.ptr.offset(row + x as isize * 2) } as *const u16;
            unsafe { p.read_unaligned() as f32 }
        }
    }
}

/// Chroma planes plus their subsampling factors.
struct Chroma {
    u: Plane,
    v: Plane,
    ss_x: bool,
    ss_y: bool,
}

/// Decode the primary image of the AVIF file at `path`.
pub fn decode(path: &Path) -> Result<DynamicImage, BackendError> {
    let bytes = std::fs::read(path)?;
    let avif = avif_parse::read_avif(&mut std::io::Cursor::new(&bytes)).map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to parse AVIF {}: {e:?}", path.display()))
    })?;
    let payload: &[u8] = &avif.primary_item;

    let mut settings = MaybeUninit::<Dav1dSettings>::uninit();
    unsafe { dav1d::dav1d_default_settings(NonNull::from(&mut settings).cast()) };
    let mut settings = unsafe { settings.assume_init() };
    settings.n_threads = 1;
    settings.max_frame_delay = 1;

    let mut handle = None;
    let rc = unsafe { dav1d::dav1d_open(NonNull::new(&mut handle), NonNull::new(&mut settings)) };
    if rc.0 != 0 {
        return Err(failed("open", rc.0));
    }
    let ctx = Release::new(handle, |ctx| unsafe { dav1d::dav1d_close(NonNull::new(ctx)) });

    let mut data = Dav1dData::default();
    let buf = unsafe { dav1d::dav1d_data_create(NonNull::new(&mut data), payload.len()) };
    if buf.is_null() {
        return Err(BackendError::ProcessingFailed("rav1d data_create failed".into()));
    }
    unsafe { std::ptr::copy_nonoverlapping(payload.as_ptr(), buf, payload.len()) };

    let rc = unsafe { dav1d::dav1d_send_data(ctx.handle, NonNull::new(&mut data)) };
    if rc.0 != 0 {
        unsafe { dav1d::dav1d_data_unref(NonNull::new(&mut data)) };
        return Err(failed("send_data", rc.0));
    }

    let mut picture: Dav1dPicture = unsafe { std::mem::zeroed() };
    let rc = unsafe { dav1d::dav1d_get_picture(ctx.handle, NonNull::new(&mut picture)) };
    if rc.0 != 0 {
        return Err(failed("get_picture", rc.0));
    }
    // Declared after `ctx`, so it is unreferenced before the context closes.
    let picture = Release::new(picture, |pic| unsafe {
        dav1d::dav1d_picture_unref(NonNull::new(pic))
    });
    let pic = &picture.handle;

    let width = pic.p.w as u32;
    let height = pic.p.h as u32;
    let bpc = pic.p.bpc as u32;
    let plane = |index: usize, stride: isize| {
        pic.data[index]
            .map(|p| Plane {
                ptr: p.as_ptr() as *const u8,
                stride,
            })
            .ok_or_else(|| BackendError::ProcessingFailed(format!("AVIF plane {index} missing")))
    };

    let luma = plane(0, pic.stride[0])?;
    let chroma = match pic.p.layout {
        DAV1D_PIXEL_LAYOUT_I400 => None,
        layout => {
            let (ss_x, ss_y) = match layout {
                DAV1D_PIXEL_LAYOUT_I420 => (true, true),
                DAV1D_PIXEL_LAYOUT_I422 => (true, false),
                DAV1D_PIXEL_LAYOUT_I444 => (false, false),
                other => {
                    return Err(BackendError::ProcessingFailed(format!(
                        "Unsupported AVIF pixel layout: {other}"
                    )));
                }
            };
            Some(Chroma {
                u: plane(1, pic.stride[1])?,
                v: plane(2, pic.stride[1])?,
                ss_x,
                ss_y,
            })
        }
    };

    let max = ((1u32 << bpc) - 1) as f32;
    let center = (1u32 << (bpc - 1)) as f32;
    let scale = 255.0 / max;
    let to_u8 = |v: f32| (v * scale).clamp(0.0, 255.0) as u8;

    // Every (x, y) below is inside the picture's planes, and `picture` stays
    // referenced until this function returns.
    let rgb = RgbImage::from_fn(width, height, |x, y| {
        let luma_value = unsafe { luma.sample(x, y, bpc) };
        match &chroma {
            None => {
                let v = to_u8(luma_value);
                Rgb([v, v, v])
            }
            Some(c) => {
                let cx = if c.ss_x { x / 2 } else { x };
                let cy = if c.ss_y { y / 2 } else { y };
                let cb = unsafe { c.u.sample(cx, cy, bpc) } - center;
                let cr = unsafe { c.v.sample(cx, cy, bpc) } - center;
                Rgb([
                    to_u8(luma_value + 1.402 * cr),
                    to_u8(luma_value - 0.344136 * cb - 0.714136 * cr),
                    to_u8(luma_value + 1.772 * cb),
                ])
            }
        }
    });

    Ok(DynamicImage::ImageRgb8(rgb))
}
