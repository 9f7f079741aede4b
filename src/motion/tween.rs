use std::fmt;

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Px(f64),
    Percent(f64),
}

impl From<f64> for Length {
    fn from(px: f64) -> Self {
        Length::Px(px)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(v) => write!(f, "{}px", v),
            Length::Percent(v) => write!(f, "{}%", v),
        }
    }
}

/// Animatable properties. Transform parts set here are absolute: a `Props`
/// that only sets `y` resets scale and rotation to identity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Props {
    pub opacity: Option<f64>,
    pub x: Option<Length>,
    pub y: Option<Length>,
    pub scale: Option<f64>,
    pub rotate: Option<f64>,
    pub rotate_x: Option<f64>,
    pub rotate_y: Option<f64>,
    pub width: Option<Length>,
    pub box_shadow: Option<String>,
    pub color: Option<String>,
    pub border_color: Option<String>,
    pub background_position: Option<String>,
    pub stroke_dasharray: Option<String>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opacity(mut self, value: f64) -> Self {
        self.opacity = Some(value);
        self
    }

    pub fn x(mut self, value: impl Into<Length>) -> Self {
        self.x = Some(value.into());
        self
    }

    pub fn y(mut self, value: impl Into<Length>) -> Self {
        self.y = Some(value.into());
        self
    }

    pub fn scale(mut self, value: f64) -> Self {
        self.scale = Some(value);
        self
    }

    pub fn rotate(mut self, degrees: f64) -> Self {
        self.rotate = Some(degrees);
        self
    }

    pub fn rotate_x(mut self, degrees: f64) -> Self {
        self.rotate_x = Some(degrees);
        self
    }

    pub fn rotate_y(mut self, degrees: f64) -> Self {
        self.rotate_y = Some(degrees);
        self
    }

    pub fn width(mut self, value: impl Into<Length>) -> Self {
        self.width = Some(value.into());
        self
    }

    pub fn box_shadow(mut self, value: impl Into<String>) -> Self {
        self.box_shadow = Some(value.into());
        self
    }

    pub fn color(mut self, value: impl Into<String>) -> Self {
        self.color = Some(value.into());
        self
    }

    pub fn border_color(mut self, value: impl Into<String>) -> Self {
        self.border_color = Some(value.into());
        self
    }

    pub fn background_position(mut self, value: impl Into<String>) -> Self {
        self.background_position = Some(value.into());
        self
    }

    pub fn stroke_dasharray(mut self, value: impl Into<String>) -> Self {
        self.stroke_dasharray = Some(value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn transform(&self) -> Option<String> {
        let mut parts = Vec::new();
        if self.x.is_some() || self.y.is_some() {
            parts.push(format!(
                "translate({}, {})",
                self.x.unwrap_or(Length::Px(0.0)),
                self.y.unwrap_or(Length::Px(0.0))
            ));
        }
        if let Some(deg) = self.rotate {
            parts.push(format!("rotate({}deg)", deg));
        }
        if let Some(deg) = self.rotate_x {
            parts.push(format!("rotateX({}deg)", deg));
        }
        if let Some(deg) = self.rotate_y {
            parts.push(format!("rotateY({}deg)", deg));
        }
        if let Some(scale) = self.scale {
            parts.push(format!("scale({})", scale));
        }
        (!parts.is_empty()).then(|| parts.join(" "))
    }

    pub fn keyframe(&self) -> Keyframe {
        Keyframe {
            opacity: self.opacity.map(|v| v.to_string()),
            transform: self.transform(),
            width: self.width.map(|v| v.to_string()),
            box_shadow: self.box_shadow.clone(),
            color: self.color.clone(),
            border_color: self.border_color.clone(),
            background_position: self.background_position.clone(),
            stroke_dasharray: self.stroke_dasharray.clone(),
        }
    }
}

/// One Web Animations keyframe, serialized as a plain JS object.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_dasharray: Option<String>,
}

impl Keyframe {
    /// Inline-style declarations (CSS property name, value).
    pub fn declarations(&self) -> Vec<(&'static str, &str)> {
        [
            ("opacity", &self.opacity),
            ("transform", &self.transform),
            ("width", &self.width),
            ("box-shadow", &self.box_shadow),
            ("color", &self.color),
            ("border-color", &self.border_color),
            ("background-position", &self.background_position),
            ("stroke-dasharray", &self.stroke_dasharray),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
        .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Linear,
    Power1InOut,
    Power2In,
    Power2Out,
    Power3Out,
    Power4Out,
    Power4InOut,
    SineInOut,
    SineOut,
    ExpoOut,
    BackOut,
    ElasticOut,
}

impl Ease {
    pub fn css(self) -> &'static str {
        match self {
            Ease::Linear => "linear",
            Ease::Power1InOut => "cubic-bezier(0.45, 0, 0.55, 1)",
            Ease::Power2In => "cubic-bezier(0.32, 0, 0.67, 0)",
            Ease::Power2Out => "cubic-bezier(0.33, 1, 0.68, 1)",
            Ease::Power3Out => "cubic-bezier(0.25, 1, 0.5, 1)",
            Ease::Power4Out => "cubic-bezier(0.22, 1, 0.36, 1)",
            Ease::Power4InOut => "cubic-bezier(0.83, 0, 0.17, 1)",
            Ease::SineInOut => "cubic-bezier(0.37, 0, 0.63, 1)",
            Ease::SineOut => "cubic-bezier(0.61, 1, 0.88, 1)",
            Ease::ExpoOut => "cubic-bezier(0.16, 1, 0.3, 1)",
            Ease::BackOut => "cubic-bezier(0.34, 1.56, 0.64, 1)",
            // cubic-bezier cannot oscillate; a single strong overshoot stands in
            Ease::ElasticOut => "cubic-bezier(0.25, 1.6, 0.45, 0.94)",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StaggerFrom {
    Start,
    Center,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum StaggerStep {
    /// Seconds between neighbouring targets.
    Each(f64),
    /// Seconds spread across the whole target list.
    Amount(f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stagger {
    step: StaggerStep,
    origin: StaggerFrom,
    /// Distribution curve of the offsets; applied as the tween's own easing
    /// when the tween leaves its ease unset.
    pub ease: Option<Ease>,
}

impl Stagger {
    pub const fn each(seconds: f64) -> Self {
        Self { step: StaggerStep::Each(seconds), origin: StaggerFrom::Start, ease: None }
    }

    pub const fn amount(seconds: f64) -> Self {
        Self { step: StaggerStep::Amount(seconds), origin: StaggerFrom::Start, ease: None }
    }

    pub const fn from(self, origin: StaggerFrom) -> Self {
        Self { origin, ..self }
    }

    pub const fn ease(self, ease: Ease) -> Self {
        Self { ease: Some(ease), ..self }
    }

    /// Delay in seconds for target `index` out of `count`.
    pub fn offset(&self, index: usize, count: usize) -> f64 {
        if count < 2 || index >= count {
            return 0.0;
        }
        let last = (count - 1) as f64;
        let distance = match self.origin {
            StaggerFrom::Start => index as f64,
            StaggerFrom::End => last - index as f64,
            StaggerFrom::Center => (index as f64 - last / 2.0).abs(),
        };
        let max_distance = match self.origin {
            StaggerFrom::Center => last / 2.0,
            _ => last,
        };
        match self.step {
            StaggerStep::Each(each) => distance * each,
            StaggerStep::Amount(amount) => distance * amount / max_distance,
        }
    }
}

/// Timing of one tween after defaults from the motion config are applied.
#[derive(Clone, Debug, PartialEq)]
pub struct Timing {
    pub duration_ms: f64,
    pub delay_ms: f64,
    pub easing: &'static str,
    pub iterations: f64,
    pub alternate: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    pub from: Option<Props>,
    pub to: Props,
    pub duration: Option<f64>,
    pub delay: f64,
    pub ease: Option<Ease>,
    pub stagger: Option<Stagger>,
    /// Extra iterations; negative repeats forever.
    pub repeat: i32,
    pub yoyo: bool,
}

impl Tween {
    pub fn to(props: Props) -> Self {
        Self {
            from: None,
            to: props,
            duration: None,
            delay: 0.0,
            ease: None,
            stagger: None,
            repeat: 0,
            yoyo: false,
        }
    }

    pub fn from_to(from: Props, to: Props) -> Self {
        Self { from: Some(from), ..Self::to(to) }
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    pub fn delay(mut self, seconds: f64) -> Self {
        self.delay = seconds;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    pub fn stagger(mut self, stagger: Stagger) -> Self {
        if self.ease.is_none() {
            self.ease = stagger.ease;
        }
        self.stagger = Some(stagger);
        self
    }

    pub fn repeat(mut self, times: i32) -> Self {
        self.repeat = times;
        self
    }

    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    /// Keyframes handed to the engine: one for a plain "to", two for "from-to".
    pub fn keyframes(&self) -> Vec<Keyframe> {
        match &self.from {
            Some(from) => vec![from.keyframe(), self.to.keyframe()],
            None => vec![self.to.keyframe()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_parts_keep_a_fixed_order() {
        let props = Props::new().scale(0.95).y(30.0).rotate_x(15.0);
        assert_eq!(
            props.keyframe().transform.as_deref(),
            Some("translate(0px, 30px) rotateX(15deg) scale(0.95)")
        );
    }

    #[test]
    fn props_without_transform_parts_leave_transform_unset() {
        let keyframe = Props::new().opacity(0.0).width(Length::Percent(37.5)).keyframe();
        assert_eq!(keyframe.transform, None);
        assert_eq!(keyframe.opacity.as_deref(), Some("0"));
        assert_eq!(keyframe.width.as_deref(), Some("37.5%"));
    }

    #[test]
    fn keyframe_serializes_to_camel_case_without_nulls() {
        let keyframe = Props::new()
            .opacity(1.0)
            .x(Length::Percent(-100.0))
            .box_shadow("0 0 30px rgba(234, 179, 8, 0.6)")
            .keyframe();
        let json = serde_json::to_value(&keyframe).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "opacity": "1",
                "transform": "translate(-100%, 0px)",
                "boxShadow": "0 0 30px rgba(234, 179, 8, 0.6)",
            })
        );
    }

    #[test]
    fn declarations_use_css_property_names() {
        let keyframe = Props::new().opacity(1.0).border_color("#eab308").keyframe();
        assert_eq!(
            keyframe.declarations(),
            vec![("opacity", "1"), ("border-color", "#eab308")]
        );
    }

    #[test]
    fn stroke_dasharray_is_camel_cased_for_keyframes_only() {
        let keyframe = Props::new().stroke_dasharray("0 120").opacity(0.0).keyframe();
        let json = serde_json::to_value(&keyframe).unwrap();
        assert_eq!(json["strokeDasharray"], "0 120");
        assert!(keyframe.declarations().contains(&("stroke-dasharray", "0 120")));
    }

    #[test]
    fn from_to_produces_two_keyframes() {
        let tween = Tween::from_to(Props::new().opacity(0.0), Props::new().opacity(1.0));
        let frames = tween.keyframes();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].opacity.as_deref(), Some("0"));
        assert_eq!(frames[1].opacity.as_deref(), Some("1"));
        assert_eq!(Tween::to(Props::new().scale(1.0)).keyframes().len(), 1);
    }

    #[test]
    fn amount_stagger_spreads_over_all_targets() {
        let stagger = Stagger::amount(0.6);
        let offsets: Vec<f64> = (0..4).map(|i| stagger.offset(i, 4)).collect();
        assert_eq!(offsets[0], 0.0);
        assert!((offsets[1] - 0.2).abs() < 1e-9);
        assert!((offsets[3] - 0.6).abs() < 1e-9);
    }

    #[test]
    fn center_stagger_starts_in_the_middle() {
        let stagger = Stagger::each(0.1).from(StaggerFrom::Center);
        assert_eq!(stagger.offset(2, 5), 0.0);
        assert!((stagger.offset(0, 5) - 0.2).abs() < 1e-9);
        assert!((stagger.offset(4, 5) - 0.2).abs() < 1e-9);

        let spread = Stagger::amount(0.6).from(StaggerFrom::Center);
        assert!((spread.offset(0, 5) - 0.6).abs() < 1e-9);
        assert!((spread.offset(3, 5) - 0.3).abs() < 1e-9);
    }

    #[test]
    fn end_stagger_runs_backwards() {
        let stagger = Stagger::each(0.1).from(StaggerFrom::End);
        assert!((stagger.offset(0, 3) - 0.2).abs() < 1e-9);
        assert_eq!(stagger.offset(2, 3), 0.0);
    }

    #[test]
    fn single_target_is_never_delayed() {
        assert_eq!(Stagger::amount(1.2).offset(0, 1), 0.0);
    }

    #[test]
    fn stagger_ease_fills_an_unset_tween_ease() {
        let tween = Tween::to(Props::new()).stagger(Stagger::amount(0.8).ease(Ease::SineInOut));
        assert_eq!(tween.ease, Some(Ease::SineInOut));
        let explicit = Tween::to(Props::new())
            .ease(Ease::BackOut)
            .stagger(Stagger::amount(0.8).ease(Ease::SineInOut));
        assert_eq!(explicit.ease, Some(Ease::BackOut));
    }
}
