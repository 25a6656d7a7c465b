//! Camera models attached to a shot.
//!
//! Keypoints stored in a shot are already undistorted, so the loop-closure
//! constraints only need the intrinsics that describe the projection of an
//! undistorted point. The distortion coefficients are kept so the same
//! configuration can describe the camera for the rest of the pipeline.

use serde::{Deserialize, Serialize};

/// Tag identifying a camera model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraModelType {
    /// Pinhole camera with Brown-Conrady distortion.
    Perspective,
    /// Fisheye camera with equidistant (Kannala-Brandt) distortion.
    Fisheye,
    /// 360° camera producing an equirectangular panorama.
    Equirectangular,
    /// Pinhole camera with a single-parameter radial division model.
    RadialDivision,
}

impl std::fmt::Display for CameraModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CameraModelType::Perspective => "perspective",
            CameraModelType::Fisheye => "fisheye",
            CameraModelType::Equirectangular => "equirectangular",
            CameraModelType::RadialDivision => "radial_division",
        };
        write!(f, "{name}")
    }
}

/// Perspective camera intrinsics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveCamera {
    /// Image width in pixels
    pub cols: u32,
    /// Image height in pixels
    pub rows: u32,
    /// Focal length in x
    pub fx: f32,
    /// Focal length in y
    pub fy: f32,
    /// Principal point x
    pub cx: f32,
    /// Principal point y
    pub cy: f32,
    /// Radial and tangential distortion `[k1, k2, p1, p2, k3]`
    #[serde(default)]
    pub distortion: [f32; 5],
}

impl PerspectiveCamera {
    /// Create an undistorted perspective camera.
    pub fn new(cols: u32, rows: u32, fx: f32, fy: f32, cx: f32, cy: f32) -> Self {
        Self {
            cols,
            rows,
            fx,
            fy,
            cx,
            cy,
            distortion: [0.0; 5],
        }
    }
}

/// Fisheye camera intrinsics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FisheyeCamera {
    /// Image width in pixels
    pub cols: u32,
    /// Image height in pixels
    pub rows: u32,
    /// Focal length in x
    pub fx: f32,
    /// Focal length in y
    pub fy: f32,
    /// Principal point x
    pub cx: f32,
    /// Principal point y
    pub cy: f32,
    /// Equidistant distortion `[k1, k2, k3, k4]`
    #[serde(default)]
    pub distortion: [f32; 4],
}

impl FisheyeCamera {
    /// Create a fisheye camera without distortion coefficients.
    pub fn new(cols: u32, rows: u32, fx: f32, fy: f32, cx: f32, cy: f32) -> Self {
        Self {
            cols,
            rows,
            fx,
            fy,
            cx,
            cy,
            distortion: [0.0; 4],
        }
    }
}

/// Equirectangular camera geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquirectangularCamera {
    /// Panorama width in pixels
    pub cols: u32,
    /// Panorama height in pixels
    pub rows: u32,
}

impl EquirectangularCamera {
    /// Create an equirectangular camera for a `cols` x `rows` panorama.
    pub fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }
}

/// Radial division camera intrinsics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadialDivisionCamera {
    /// Image width in pixels
    pub cols: u32,
    /// Image height in pixels
    pub rows: u32,
    /// Focal length in x
    pub fx: f32,
    /// Focal length in y
    pub fy: f32,
    /// Principal point x
    pub cx: f32,
    /// Principal point y
    pub cy: f32,
    /// Distortion parameter of the division model
    pub distortion: f32,
}

/// A camera model and its parameters.
///
/// Serialized with an internal `"model"` tag, e.g.
/// `{"model": "equirectangular", "cols": 1024, "rows": 512}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum Camera {
    /// Perspective camera
    Perspective(PerspectiveCamera),
    /// Fisheye camera
    Fisheye(FisheyeCamera),
    /// Equirectangular camera
    Equirectangular(EquirectangularCamera),
    /// Radial division camera
    RadialDivision(RadialDivisionCamera),
}

impl Camera {
    /// Tag of the camera model.
    pub fn model_type(&self) -> CameraModelType {
        match self {
            Camera::Perspective(_) => CameraModelType::Perspective,
            Camera::Fisheye(_) => CameraModelType::Fisheye,
            Camera::Equirectangular(_) => CameraModelType::Equirectangular,
            Camera::RadialDivision(_) => CameraModelType::RadialDivision,
        }
    }
}
