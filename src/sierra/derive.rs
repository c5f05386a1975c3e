//! Augmented limb lead derivation
//!
//! The device stores leads III, aVR, aVL and aVF as residuals against the
//! values Goldberger's equations predict from leads I and II. Recovering them
//! is an in-place integer correction over the first six leads:
//!
//! ```text
//! III = II - I - III
//! aVR = -aVR - floor((I + II) / 2)
//! aVL = floor((I - III) / 2) - aVL     (corrected III)
//! aVF = floor((II + III) / 2) - aVF    (corrected III)
//! ```
//!
//! Intermediate sums are computed in `i32` and halved with floor division;
//! results are stored back as `i16`.

use log::{debug, warn};

use super::models::EcgLead;

/// Number of leading leads the derivation reads and rewrites
pub const DERIVATION_LEAD_COUNT: usize = 6;

#[inline]
fn half_floor(value: i32) -> i32 {
    value.div_euclid(2)
}

/// Corrected lead III sample
#[inline]
pub fn derive_iii(i: i16, ii: i16, iii: i16) -> i16 {
    (i32::from(ii) - i32::from(i) - i32::from(iii)) as i16
}

/// Corrected lead aVR sample
#[inline]
pub fn derive_avr(i: i16, ii: i16, avr: i16) -> i16 {
    (-i32::from(avr) - half_floor(i32::from(i) + i32::from(ii))) as i16
}

/// Corrected lead aVL sample, from the already corrected lead III
#[inline]
pub fn derive_avl(i: i16, iii: i16, avl: i16) -> i16 {
    (half_floor(i32::from(i) - i32::from(iii)) - i32::from(avl)) as i16
}

/// Corrected lead aVF sample, from the already corrected lead III
#[inline]
pub fn derive_avf(ii: i16, iii: i16, avf: i16) -> i16 {
    (half_floor(i32::from(ii) + i32::from(iii)) - i32::from(avf)) as i16
}

/// Rewrite leads 2..=5 (III, aVR, aVL, aVF) in place from leads 0 and 1
/// (I, II).
///
/// Returns `false` and leaves the leads untouched when fewer than six leads
/// are present.
pub fn derive_augmented_leads(leads: &mut [EcgLead]) -> bool {
    if leads.len() < DERIVATION_LEAD_COUNT {
        warn!(
            "Only {} leads present; skipping augmented lead derivation",
            leads.len()
        );
        return false;
    }

    let (recorded, derived) = leads.split_at_mut(2);
    let (lead_i, lead_ii) = (&recorded[0].samples, &recorded[1].samples);
    let [lead_iii, lead_avr, lead_avl, lead_avf, ..] = derived else {
        return false;
    };

    for ((iii, &i), &ii) in lead_iii.samples.iter_mut().zip(lead_i).zip(lead_ii) {
        *iii = derive_iii(i, ii, *iii);
    }

    for ((avr, &i), &ii) in lead_avr.samples.iter_mut().zip(lead_i).zip(lead_ii) {
        *avr = derive_avr(i, ii, *avr);
    }

    for ((avl, &i), &iii) in lead_avl.samples.iter_mut().zip(lead_i).zip(&lead_iii.samples) {
        *avl = derive_avl(i, iii, *avl);
    }

    for ((avf, &ii), &iii) in lead_avf.samples.iter_mut().zip(lead_ii).zip(&lead_iii.samples) {
        *avf = derive_avf(ii, iii, *avf);
    }

    debug!(
        "Derived {}, {}, {}, {} from {} and {}",
        lead_iii.label, lead_avr.label, lead_avl.label, lead_avf.label, recorded[0].label, recorded[1].label
    );
    true
}
