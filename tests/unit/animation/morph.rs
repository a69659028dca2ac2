use super::*;

#[derive(Clone, Debug, PartialEq)]
struct Track(Vec<Vec<f64>>);

impl Morphable for Track {
    fn same_topology(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self.0.iter().zip(&other.0).all(|(a, b)| a.len() == b.len())
    }

    fn is_blank(&self) -> bool {
        self.0.is_empty()
    }

    fn lerp_to(&self, other: &Self, t: f64) -> Self {
        Track(
            self.0
                .iter()
                .zip(&other.0)
                .map(|(a, b)| a.iter().zip(b).map(|(x, y)| x + (y - x) * t).collect())
                .collect(),
        )
    }
}

fn pair() -> (Track, Track) {
    (
        Track(vec![vec![0.0, 1.0], vec![2.0]]),
        Track(vec![vec![10.0, 11.0], vec![12.0]]),
    )
}

#[test]
fn controller_is_idle_until_triggered() {
    let mut c = MorphController::new(800.0);
    assert_eq!(c.state(), MorphState::Idle);
    assert_eq!(c.tick(5_000.0), 0.0);
    assert!(!c.is_interpolating());
}

#[test]
fn controller_runs_and_returns_to_idle() {
    let mut c = MorphController::new(800.0);
    c.trigger(1_000.0);
    assert!(c.is_running());
    assert_eq!(c.tick(1_000.0), 0.0);
    let mid = c.tick(1_400.0);
    assert!((mid - 0.5).abs() < 1e-12);
    assert!(c.is_interpolating());
    assert_eq!(c.tick(1_900.0), 1.0);
    assert_eq!(c.state(), MorphState::Idle);
    assert_eq!(c.progress(), 1.0);
}

#[test]
fn retrigger_restarts_from_zero() {
    let mut c = MorphController::default();
    c.trigger(0.0);
    c.tick(400.0);
    c.trigger(500.0);
    assert_eq!(c.progress(), 0.0);
    assert_eq!(c.tick(500.0), 0.0);
}

#[test]
fn zero_duration_completes_immediately() {
    let mut c = MorphController::new(0.0);
    c.trigger(10.0);
    assert_eq!(c.tick(10.0), 1.0);
    assert!(!c.is_running());
}

#[test]
fn sample_endpoints_are_exact() {
    let (a, b) = pair();
    let m = Morph::new(a.clone(), b.clone(), MorphController::default());
    assert!(m.ready());
    assert_eq!(*m.sample(0.0), a);
    assert_eq!(*m.sample(1.0), b);
    assert!(matches!(m.sample(0.0), Cow::Borrowed(_)));
    assert_eq!(*m.sample(0.5), Track(vec![vec![5.0, 6.0], vec![7.0]]));
}

#[test]
fn mismatched_topology_is_not_ready_and_shows_from() {
    let (a, _) = pair();
    let b = Track(vec![vec![1.0], vec![2.0]]);
    let mut m = Morph::new(a.clone(), b, MorphController::default());
    assert!(!m.ready());
    m.trigger(0.0);
    assert_eq!(m.tick(400.0), 0.0);
    assert_eq!(*m.sample(0.5), a);
    assert_eq!(*m.current(), a);
}

#[test]
fn empty_sets_are_not_ready() {
    let m = Morph::new(Track(vec![]), Track(vec![]), MorphController::default());
    assert!(!m.ready());
}

#[test]
fn current_follows_controller() {
    let (a, b) = pair();
    let mut m = Morph::new(a.clone(), b.clone(), MorphController::new(100.0));
    assert_eq!(*m.current(), a);
    m.trigger(0.0);
    m.tick(100.0);
    assert_eq!(*m.current(), b);
}

#[test]
fn progress_follows_cubic_in_out() {
    let mut c = MorphController::new(1_000.0);
    c.trigger(0.0);
    assert!((c.tick(200.0) - 0.032).abs() < 1e-12);
    assert!((c.tick(800.0) - 0.968).abs() < 1e-12);
}
