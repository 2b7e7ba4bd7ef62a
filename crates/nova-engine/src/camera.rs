/// Player camera transform as last sent by the caller.
///
/// Angles are in degrees, using the client's convention.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PlayerCamera {
    pub position: [f64; 3],
    pub yaw: f64,
    pub pitch: f64,
}

impl PlayerCamera {
    pub fn new(x: f64, y: f64, z: f64, yaw: f64, pitch: f64) -> Self {
        Self { position: [x, y, z], yaw, pitch }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_lands_on_fields() {
        let cam = PlayerCamera::new(1.5, 64.0, -2.0, 180.0, -30.0);
        assert_eq!(cam.position, [1.5, 64.0, -2.0]);
        assert_eq!((cam.yaw, cam.pitch), (180.0, -30.0));
    }
}
