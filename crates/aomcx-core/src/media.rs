use serde::{Deserialize, Serialize};

use crate::constants::{MAX_MEDIA, MHZ_THRESHOLD, NM_THRESHOLD};
use crate::error::PrepError;
use crate::types::MediumId;

/// Optical properties of one medium.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Medium {
    /// Scattering coefficient (1/mm).
    pub mus: f32,
    /// Anisotropy factor.
    pub g: f32,
    /// Absorption coefficient (1/mm).
    pub mua: f32,
    /// Refractive index.
    pub n: f32,
}

impl Medium {
    /// Medium 0: non-scattering, non-absorbing, index-matched background.
    pub const AIR: Medium = Medium {
        mus: 0.0,
        g: 1.0,
        mua: 0.0,
        n: 1.0,
    };
}

/// Media indexed by [`MediumId`]. Entry 0 is always air.
#[derive(Debug, Clone, PartialEq)]
pub struct MediumTable {
    media: Vec<Medium>,
}

impl Default for MediumTable {
    fn default() -> Self {
        Self {
            media: vec![Medium::AIR],
        }
    }
}

impl MediumTable {
    /// Build a table from the declared (non-air) media, prepending air.
    pub fn with_air(declared: &[Medium]) -> Result<Self, PrepError> {
        let count = declared.len() + 1;
        if count > MAX_MEDIA {
            return Err(PrepError::TooManyMedia(count));
        }
        let mut media = Vec::with_capacity(count);
        media.push(Medium::AIR);
        media.extend_from_slice(declared);
        Ok(Self { media })
    }

    /// Convert coefficients from 1/mm to 1/grid-unit. Air is left alone.
    pub fn scale_to_unit(&mut self, unit_in_mm: f32) {
        if unit_in_mm == 1.0 {
            return;
        }
        for medium in self.media.iter_mut().skip(1) {
            medium.mus *= unit_in_mm;
            medium.mua *= unit_in_mm;
        }
    }

    pub fn get(&self, id: MediumId) -> Option<&Medium> {
        self.media.get(id.0 as usize)
    }

    /// Number of media, air included.
    pub fn len(&self) -> usize {
        self.media.len()
    }

    pub fn is_empty(&self) -> bool {
        self.media.is_empty()
    }

    pub fn as_slice(&self) -> &[Medium] {
        &self.media
    }
}

/// Bulk acoustic properties of the medium carrying the ultrasound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcousticConstants {
    /// Mass density (kg/m^3).
    pub rho: f32,
    /// Speed of sound (m/s).
    pub va: f32,
    /// Source frequency (Hz, or MHz when below 1e3).
    pub f: f32,
}

impl Default for AcousticConstants {
    fn default() -> Self {
        Self {
            rho: 1000.0,
            va: 1500.0,
            f: 1.1e6,
        }
    }
}

impl AcousticConstants {
    /// Frequency in Hz.
    pub fn normalized(self) -> Self {
        let f = if self.f < MHZ_THRESHOLD {
            self.f * 1e6
        } else {
            self.f
        };
        Self { f, ..self }
    }
}

/// Optical constants for the acousto-optic interaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpticalConstants {
    /// Vacuum wavelength (m, or nm when above 1).
    pub lambda: f32,
    /// Elasto-optic coefficient.
    pub nu: f32,
}

impl Default for OpticalConstants {
    fn default() -> Self {
        Self {
            lambda: 1064e-9,
            nu: 0.32,
        }
    }
}

impl OpticalConstants {
    /// Wavelength in meters.
    pub fn normalized(self) -> Self {
        let lambda = if self.lambda > NM_THRESHOLD {
            self.lambda / 1e9
        } else {
            self.lambda
        };
        Self { lambda, ..self }
    }
}
