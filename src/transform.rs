use std::fmt::Write;

/// Visual transform written to one element per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub rotate: f64,
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub scale: f64,
    pub scale_x: f64,
    pub opacity: Option<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translate_x: 0.0,
        translate_y: 0.0,
        rotate: 0.0,
        rotate_x: 0.0,
        rotate_y: 0.0,
        scale: 1.0,
        scale_x: 1.0,
        opacity: None,
    };

    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            translate_x: x,
            translate_y: y,
            ..Self::IDENTITY
        }
    }

    /// Layers `other` on top: offsets and angles add, scales and opacity
    /// multiply.
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            translate_x: self.translate_x + other.translate_x,
            translate_y: self.translate_y + other.translate_y,
            rotate: self.rotate + other.rotate,
            rotate_x: self.rotate_x + other.rotate_x,
            rotate_y: self.rotate_y + other.rotate_y,
            scale: self.scale * other.scale,
            scale_x: self.scale_x * other.scale_x,
            opacity: match (self.opacity, other.opacity) {
                (Some(a), Some(b)) => Some(a * b),
                (a, b) => a.or(b),
            },
        }
    }

    pub fn to_css(&self) -> String {
        let mut parts = Vec::new();

        if self.translate_x != 0.0 || self.translate_y != 0.0 {
            parts.push(format!(
                "translate3d({:.2}px, {:.2}px, 0)",
                self.translate_x, self.translate_y
            ));
        }
        if self.rotate != 0.0 {
            parts.push(format!("rotate({:.2}deg)", self.rotate));
        }
        if self.rotate_x != 0.0 {
            parts.push(format!("rotateX({:.2}deg)", self.rotate_x));
        }
        if self.rotate_y != 0.0 {
            parts.push(format!("rotateY({:.2}deg)", self.rotate_y));
        }
        if self.scale != 1.0 {
            parts.push(format!("scale({:.4})", self.scale));
        }
        if self.scale_x != 1.0 {
            parts.push(format!("scaleX({:.4})", self.scale_x));
        }

        let mut css = if parts.is_empty() {
            "transform: none;".to_string()
        } else {
            format!("transform: {};", parts.join(" "))
        };

        if let Some(opacity) = self.opacity {
            let _ = write!(css, " opacity: {:.3};", opacity.clamp(0.0, 1.0));
        }

        css
    }
}
