use lattice_rules::{HeaderMatchSpec, Listener, ListenerRuleCompiler, Protocol};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .init();

    let listener = Listener::new("orders", Protocol::Https, "svc-0123", 404);
    let mut compiler = ListenerRuleCompiler::new(listener).expect("default action is valid");

    compiler
        .rule("service-one", 100, |r| r.path_exact("/serviceOne").forward("tg-one"))
        .expect("first rule is valid");

    compiler
        .rule("canary", 50, |r| {
            r.header(HeaderMatchSpec::exact("x-canary", "true"))
                .forward_weighted("tg-stable", 90)
                .forward_weighted("tg-canary", 10)
        })
        .expect("canary rule is valid");

    // Rejected: priority 100 is taken.
    if let Err(err) = compiler.rule("deletes", 100, |r| r.method("DELETE").respond(403)) {
        println!("rejected: {err}");
    }

    // Rejected: two targets, one without a weight.
    if let Err(err) = compiler.rule("split", 200, |r| {
        r.method("GET").forward("tg-a").forward_weighted("tg-b", 30)
    }) {
        println!("rejected: {err}");
    }

    println!("{compiler}");
    for rule in compiler.rules().evaluation_order() {
        println!("  {rule}");
    }
    println!("{}", compiler.to_json().expect("definition serializes"));
}
