//! Cavity air models.

use turgor_types::Scalar;

use crate::traits::AirModel;

/// Isobaric air: constant pressure regardless of cavity volume.
///
/// The inflation driver sweeps this pressure upward between static
/// solves; dp/dV is identically zero, which also means the optimizer's
/// Jacobian carries no volume-coupling term for this model.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsobaricAir {
    /// Cavity pressure (force per unit area).
    pub pressure: Scalar,
}

impl IsobaricAir {
    /// Creates an isobaric model at the given pressure.
    pub fn new(pressure: Scalar) -> Self {
        Self { pressure }
    }
}

impl AirModel for IsobaricAir {
    fn pressure(&self, _volume: Scalar) -> Scalar {
        self.pressure
    }

    fn pressure_volume_derivative(&self, _volume: Scalar) -> Scalar {
        0.0
    }

    fn name(&self) -> &str {
        "air_isobaric"
    }
}
