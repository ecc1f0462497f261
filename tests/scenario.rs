use semnet::prelude::*;

/// Injects activation into neuron 2 on its first call only and records the
/// step numbers on which it was called.
#[derive(Default)]
struct OneShot {
    calls: Vec<u64>,
    step: u64,
}

impl Hooks<i8> for OneShot {
    fn load_input(&mut self, input: &mut Stimulus<'_, i8>) {
        if self.calls.is_empty() {
            input.set(2, 1);
        }
        self.calls.push(self.step);
    }

    fn push_output(&mut self, _view: &NetworkView<'_, i8>) {}
}

fn scenario() -> Network<i8, OneShot> {
    let mut net: Network<i8, OneShot> = Network::new(4, OneShot::default());
    net.set_permanent_count(1).unwrap();
    net.set_thresholds(&[1, 1, 1, 1]).unwrap();
    net.set_link_counts(vec![0, 0, 2, 0]);
    net.set_links(vec![0, 3], vec![1, 1]);
    net.rebuild_offsets().unwrap();
    net
}

#[test]
fn latch_scenario_fires_2_1_1() {
    let mut net = scenario();
    assert_eq!(net.link_offsets(), &[0, 0, 0, 2]);

    let mut fired = Vec::new();
    for step in 1..=3 {
        net.hooks_mut().step = step;
        fired.push(net.step().unwrap());
    }

    assert_eq!(fired, vec![2, 1, 1]);
    assert_eq!(net.activations(), &[1, 0, 0, 0]);
    assert_eq!(net.hooks().calls, vec![1, 3]);
}

#[test]
fn latch_scenario_from_config_matches_manual_setup() {
    let cfg = NetworkConfig {
        neurons: 4,
        permanent_count: 1,
        thresholds: vec![1, 1, 1, 1],
        link_counts: vec![0, 0, 2, 0],
        targets: vec![0, 3],
        biases: vec![1, 1],
    };
    let mut a = Network::from_config(&cfg, OneShot::default()).unwrap();
    let mut b = scenario();

    for _ in 0..5 {
        assert_eq!(a.step(), b.step());
        assert_eq!(a.activations(), b.activations());
    }
    assert_eq!(a.embedding(), vec![1]);
}

#[test]
fn step_before_rebuild_is_a_configuration_error() {
    let mut net: Network<i8, OneShot> = Network::new(4, OneShot::default());
    net.set_permanent_count(1).unwrap();
    assert_eq!(net.step(), Err(ConfigError::StaleOffsets));
    assert!(net.hooks().calls.is_empty());
}
