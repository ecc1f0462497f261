use semnet::console::{build_console_network, ConsoleConfig, ConsoleError, WiringFile};
use semnet::demo;

#[test]
fn periodic_demo_alternates_a_and_b() {
    let mut net = demo::periodic_network().unwrap();
    net.hooks_mut().set_print_to_console(false);

    let mut fired = Vec::new();
    for _ in 0..8 {
        fired.push(net.step().unwrap());
    }
    assert_eq!(net.hooks_mut().flush_output(), "abababab");
    assert_eq!(fired, vec![3, 4, 3, 4, 3, 4, 3, 4]);
}

#[test]
fn periodic_demo_states_cycle() {
    let mut net = demo::periodic_network().unwrap();
    net.hooks_mut().set_print_to_console(false);

    net.step().unwrap();
    assert_eq!(net.activations(), &[1, 0, 0, 1, 1, 1, 0]);
    net.step().unwrap();
    assert_eq!(net.activations(), &[0, 0, 0, 2, 0, 0, 1]);
    net.step().unwrap();
    assert_eq!(net.activations(), &[1, 0, 0, 1, 1, 1, 0]);
    // The latch flips every step, so the gate keeps recording new state.
    assert_eq!(net.last_permanent(), &[0]);
}

#[test]
fn periodic_demo_never_settles_after_reset_input() {
    let console = ConsoleConfig {
        print_to_console: false,
        max_settle_steps: 50,
        ..demo::periodic_console()
    };
    let mut net = build_console_network(&demo::periodic_config(), &console).unwrap();

    // Each "reset" restarts the oscillator; after the second one the settle
    // check is out of phase with the latch, which flips every step.
    match net.process_input("reset reset") {
        Err(ConsoleError::Unsettled { steps }) => assert_eq!(steps, 50),
        other => panic!("expected Unsettled, got {:?}", other.map(|_| ())),
    }
    assert!(net.hooks_mut().flush_output().starts_with("aaabab"));
}

#[test]
fn periodic_demo_settles_after_unknown_token() {
    let console = ConsoleConfig {
        print_to_console: false,
        ..demo::periodic_console()
    };
    let mut net = build_console_network(&demo::periodic_config(), &console).unwrap();
    assert_eq!(net.process_input("x").unwrap(), 2);
    assert_eq!(net.hooks_mut().flush_output(), "ab");
}

#[test]
fn echo_wiring_file_answers_greetings() {
    let file = WiringFile::from_json_str(include_str!("../wiring/echo.json")).unwrap();
    let mut net = file.build().unwrap();
    net.hooks_mut().set_print_to_console(false);

    assert_eq!(net.process_input("Hello!").unwrap(), 3);
    assert_eq!(net.hooks_mut().flush_output(), "Hello!");

    // "reset" fires the sentinel; the following step starts from zero.
    net.process_input("reset").unwrap();
    assert_eq!(net.activations(), &[0, 0, 0, 0, 0, 0]);
    assert_eq!(net.hooks_mut().flush_output(), "");
}
