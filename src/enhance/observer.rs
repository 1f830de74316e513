//! One-shot visibility observation along the vertical axis.
//!
//! Targets are observed until they first intersect the (margin-adjusted)
//! viewport by at least the threshold ratio, reported once, then dropped.

/// Vertical extent of something on the page, in page pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub top: i64,
    pub height: u32,
}

impl Bounds {
    pub fn new(top: i64, height: u32) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> i64 {
        self.top + i64::from(self.height)
    }
}

/// Margins that grow (positive) or shrink (negative) the viewport
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RootMargin {
    pub top: i32,
    pub bottom: i32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f32,
    pub margin: RootMargin,
}

impl ObserverOptions {
    /// Lazy images start loading 50px before they scroll in
    pub fn lazy_images() -> Self {
        Self {
            threshold: 0.1,
            margin: RootMargin { top: 50, bottom: 50 },
        }
    }

    pub fn fade_in() -> Self {
        Self {
            threshold: 0.1,
            margin: RootMargin { top: 0, bottom: -50 },
        }
    }

    /// Counters wait until half visible and clear of the bottom edge
    pub fn counters() -> Self {
        Self {
            threshold: 0.5,
            margin: RootMargin { top: 0, bottom: -100 },
        }
    }
}

#[derive(Debug, Clone)]
pub struct VisibilityObserver<K> {
    options: ObserverOptions,
    targets: Vec<(K, Bounds)>,
}

impl<K: Clone + PartialEq> VisibilityObserver<K> {
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            targets: Vec::new(),
        }
    }

    pub fn observe(&mut self, key: K, bounds: Bounds) {
        self.unobserve(&key);
        self.targets.push((key, bounds));
    }

    pub fn unobserve(&mut self, key: &K) {
        self.targets.retain(|(k, _)| k != key);
    }

    pub fn is_observing(&self, key: &K) -> bool {
        self.targets.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Report targets that became visible in `viewport` and stop observing them
    pub fn check(&mut self, viewport: Bounds) -> Vec<K> {
        let root_top = viewport.top - i64::from(self.options.margin.top);
        let root_bottom = viewport.bottom() + i64::from(self.options.margin.bottom);
        let threshold = self.options.threshold;

        let mut fired = Vec::new();
        self.targets.retain(|(key, bounds)| {
            let visible = intersection_ratio(*bounds, root_top, root_bottom) >= threshold
                && overlaps(*bounds, root_top, root_bottom);
            if visible {
                fired.push(key.clone());
            }
            !visible
        });
        fired
    }
}

fn overlaps(bounds: Bounds, root_top: i64, root_bottom: i64) -> bool {
    if bounds.height == 0 {
        return bounds.top >= root_top && bounds.top <= root_bottom;
    }
    bounds.top < root_bottom && bounds.bottom() > root_top
}

fn intersection_ratio(bounds: Bounds, root_top: i64, root_bottom: i64) -> f32 {
    if bounds.height == 0 {
        return if overlaps(bounds, root_top, root_bottom) { 1.0 } else { 0.0 };
    }
    let visible = (bounds.bottom().min(root_bottom) - bounds.top.max(root_top)).max(0);
    visible as f32 / bounds.height as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lazy_images_fire_inside_the_margin_once() {
        let mut observer = VisibilityObserver::new(ObserverOptions::lazy_images());
        observer.observe("hero.png", Bounds::new(1020, 200));
        observer.observe("footer.png", Bounds::new(3000, 200));

        // Viewport ends at 1000; the 50px margin reaches 1050, 30px of 200 visible
        assert_eq!(observer.check(Bounds::new(0, 1000)), vec!["hero.png"]);
        assert!(!observer.is_observing(&"hero.png"));
        assert_eq!(observer.len(), 1);

        assert!(observer.check(Bounds::new(0, 1000)).is_empty());
        assert_eq!(observer.check(Bounds::new(2500, 1000)), vec!["footer.png"]);
        assert!(observer.is_empty());
    }

    #[test]
    fn counters_need_half_visibility_above_the_bottom_margin() {
        let mut observer = VisibilityObserver::new(ObserverOptions::counters());
        observer.observe(1, Bounds::new(850, 100));

        // Effective viewport bottom is 900; only 50/100 visible -> fires at 0.5
        assert_eq!(observer.check(Bounds::new(0, 1000)), vec![1]);

        observer.observe(2, Bounds::new(870, 100));
        assert!(observer.check(Bounds::new(0, 1000)).is_empty());
        assert_eq!(observer.check(Bounds::new(100, 1000)), vec![2]);
    }

    #[test]
    fn reobserving_replaces_bounds() {
        let mut observer = VisibilityObserver::new(ObserverOptions::fade_in());
        observer.observe("card", Bounds::new(5000, 100));
        observer.observe("card", Bounds::new(10, 100));
        assert_eq!(observer.len(), 1);
        assert_eq!(observer.check(Bounds::new(0, 800)), vec!["card"]);
    }
}
