//! Commonly used opaque colors

use super::{rgb, Color};

pub fn black() -> Color { rgb(0.0, 0.0, 0.0) }

pub fn white() -> Color { rgb(1.0, 1.0, 1.0) }

pub fn red() -> Color { rgb(1.0, 0.0, 0.0) }

pub fn green() -> Color { rgb(0.0, 1.0, 0.0) }

pub fn blue() -> Color { rgb(0.0, 0.0, 1.0) }
