//! Unit tests for des-core primitives.

#[cfg(test)]
mod ids {
    use crate::{DesError, EventId, ProcessId, ResourceId};

    #[test]
    fn next_is_the_arena_length() {
        let id = EventId::next(42).unwrap();
        assert_eq!(id, EventId(42));
        assert_eq!(id.index(), 42);
    }

    #[test]
    fn next_never_hands_out_the_sentinel() {
        assert_eq!(EventId::INVALID.0, u32::MAX);
        assert_eq!(ProcessId::next(u32::MAX as usize - 1).unwrap(), ProcessId(u32::MAX - 1));
        assert!(matches!(
            ProcessId::next(u32::MAX as usize),
            Err(DesError::IdsExhausted("ProcessId"))
        ));
        assert!(ResourceId::next(usize::MAX).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(ResourceId(3).to_string(), "ResourceId(3)");
    }
}

#[cfg(test)]
mod time {
    use std::collections::BTreeMap;

    use crate::{DesError, SimClock, SimConfig, SimTime};

    #[test]
    fn offset_and_since() {
        let t = SimTime(1.5);
        assert_eq!(t.offset(2.0).unwrap(), SimTime(3.5));
        assert_eq!(SimTime(3.5).since(t), 2.0);
    }

    #[test]
    fn offset_rejects_bad_delays() {
        assert!(matches!(SimTime::ZERO.offset(-1.0), Err(DesError::InvalidDelay(_))));
        assert!(SimTime::ZERO.offset(f64::NAN).is_err());
        assert!(SimTime::ZERO.offset(f64::INFINITY).is_err());
        assert!(SimTime::ZERO.offset(0.0).is_ok());
    }

    #[test]
    fn usable_as_ordered_key() {
        let mut m = BTreeMap::new();
        m.insert(SimTime(2.0), "b");
        m.insert(SimTime(0.25), "a");
        m.insert(SimTime(10.0), "c");
        let order: Vec<_> = m.values().copied().collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn clock_only_moves_forward() {
        let mut clock = SimClock::new();
        clock.advance_to(SimTime(5.0)).unwrap();
        clock.advance_to(SimTime(5.0)).unwrap();
        assert_eq!(clock.now(), SimTime(5.0));
        let err = clock.advance_to(SimTime(4.0)).unwrap_err();
        assert!(matches!(err, DesError::TimeReversal { .. }));
        assert_eq!(clock.now(), SimTime(5.0));
    }

    #[test]
    fn config_validation() {
        assert!(SimConfig::new(Some(SimTime(120.0)), 42).validate().is_ok());
        assert!(SimConfig::new(None, 42).validate().is_ok());
        assert!(SimConfig::new(Some(SimTime(-1.0)), 42).validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut a = SimRng::new(42);
        let mut b = SimRng::new(42);
        let va: Vec<u32> = (0..8).map(|_| a.gen_range(1..=6)).collect();
        let vb: Vec<u32> = (0..8).map(|_| b.gen_range(1..=6)).collect();
        assert_eq!(va, vb);
    }

    #[test]
    fn exponential_is_non_negative_with_plausible_mean() {
        let mut rng = SimRng::new(7);
        let n = 20_000;
        let mut sum = 0.0;
        for _ in 0..n {
            let x = rng.exponential(0.5);
            assert!(x >= 0.0 && x.is_finite());
            sum += x;
        }
        let mean = sum / n as f64;
        assert!((mean - 0.5).abs() < 0.05, "got {mean}");
    }
}
