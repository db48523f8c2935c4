use crate::error::{TooltipError, TooltipResult};

/// Linear mapping between a data domain and a pixel range.
///
/// The pixel range may run in either direction, which is how value axes get
/// their inverted (top = max) orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    pixel_start: f64,
    pixel_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        pixel_start: f64,
        pixel_end: f64,
    ) -> TooltipResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(TooltipError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !pixel_start.is_finite() || !pixel_end.is_finite() || pixel_start == pixel_end {
            return Err(TooltipError::InvalidData(
                "scale pixel range must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            pixel_start,
            pixel_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn domain_to_pixel(self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Some(self.pixel_start + normalized * (self.pixel_end - self.pixel_start))
    }

    #[must_use]
    pub fn pixel_to_domain(self, pixel: f64) -> Option<f64> {
        if !pixel.is_finite() {
            return None;
        }
        let normalized = (pixel - self.pixel_start) / (self.pixel_end - self.pixel_start);
        Some(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }
}

/// Rounds a raw step to the nearest 1/2/5 x 10^n value.
#[must_use]
pub fn nice_step(step_abs: f64) -> f64 {
    if !step_abs.is_finite() || step_abs <= 0.0 {
        return 1.0;
    }

    let magnitude = 10.0_f64.powf(step_abs.log10().floor());
    if !magnitude.is_finite() || magnitude <= 0.0 {
        return step_abs;
    }

    let normalized = step_abs / magnitude;
    let nice = if normalized < 1.5 {
        1.0
    } else if normalized < 3.0 {
        2.0
    } else if normalized < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}
