use std::sync::{Arc, Mutex};
use std::thread;

use lattice_rules::{Listener, ListenerRuleCompiler, Protocol, RuleError};

#[test]
fn serialized_adds_across_threads_keep_priorities_unique() {
    let compiler = Arc::new(Mutex::new(
        ListenerRuleCompiler::new(Listener::new("shared", Protocol::Http, "svc", 404)).unwrap(),
    ));

    let mut handles = vec![];
    for t in 0..4_u32 {
        let c = Arc::clone(&compiler);
        handles.push(thread::spawn(move || {
            let mut rejected = 0_u32;
            // Every thread competes for the same ten priorities.
            for priority in 0..10_u32 {
                let mut guard = c.lock().unwrap();
                match guard.rule(&format!("t{t}-p{priority}"), priority, |r| {
                    r.method("GET").respond(200)
                }) {
                    Ok(_) => {}
                    Err(RuleError::DuplicatePriority { .. }) => rejected += 1,
                    Err(other) => panic!("unexpected error: {other}"),
                };
            }
            rejected
        }));
    }

    let rejected: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();
    let compiler = compiler.lock().unwrap();
    assert_eq!(compiler.len(), 10);
    assert_eq!(rejected, 30);
    assert_eq!(
        compiler.rules().priorities().collect::<Vec<_>>(),
        (0..10).collect::<Vec<_>>()
    );
}

#[test]
fn compiled_rules_readable_from_many_threads() {
    let mut compiler =
        ListenerRuleCompiler::new(Listener::new("ro", Protocol::Https, "svc", 404)).unwrap();
    for i in 0..20_u32 {
        compiler
            .rule(&format!("r{i}"), i, |r| r.path_prefix(format!("/r{i}")).forward("tg"))
            .unwrap();
    }
    let compiler = Arc::new(compiler);
    let expected = compiler.to_json().unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let c = Arc::clone(&compiler);
            thread::spawn(move || c.to_json().unwrap())
        })
        .collect();

    for h in handles {
        assert_eq!(h.join().unwrap(), expected);
    }
}
