use lattice_rules::{
    Action, HeaderMatchSpec, HeaderValueMatch, HttpMethod, Listener, ListenerRuleCompiler,
    MatchCriteria, PathMatchSpec, Protocol, Rule, RuleError, RuleSpec, TargetReference,
};

fn compiler() -> ListenerRuleCompiler {
    ListenerRuleCompiler::new(Listener::new("edge", Protocol::Http, "svc", 404)).unwrap()
}

#[test]
fn priority_zero_is_a_real_priority() {
    let mut c = compiler();
    c.rule("zero", 0, |r| r.method("GET").respond(200)).unwrap();
    let err = c.rule("zero-again", 0, |r| r.method("PUT").respond(200)).unwrap_err();
    assert!(matches!(err, RuleError::DuplicatePriority { priority: 0, .. }));
}

#[test]
fn priorities_equal_to_existing_positions_are_free() {
    let mut c = compiler();
    c.rule("a", 10, |r| r.method("GET").respond(200)).unwrap();
    c.rule("b", 20, |r| r.method("POST").respond(200)).unwrap();
    // Positions 0 and 1 are occupied, priorities 0 and 1 are not.
    c.rule("c", 0, |r| r.method("PUT").respond(200)).unwrap();
    c.rule("d", 1, |r| r.method("DELETE").respond(200)).unwrap();
    assert_eq!(c.len(), 4);
}

#[test]
fn max_priority_accepted() {
    let mut c = compiler();
    c.rule("max", u32::MAX, |r| r.method("GET").respond(200)).unwrap();
    assert!(c.rules().contains_priority(u32::MAX));
}

#[test]
fn evaluation_order_is_by_priority() {
    let mut c = compiler();
    c.rule("third", 30, |r| r.method("GET").respond(200)).unwrap();
    c.rule("first", 1, |r| r.method("POST").respond(200)).unwrap();
    c.rule("second", 2, |r| r.method("PUT").respond(200)).unwrap();

    let order: Vec<&str> = c
        .rules()
        .evaluation_order()
        .into_iter()
        .map(Rule::name)
        .collect();
    assert_eq!(order, vec!["first", "second", "third"]);

    let inserted: Vec<&str> = c.rules().iter().map(Rule::name).collect();
    assert_eq!(inserted, vec!["third", "first", "second"]);
}

#[test]
fn duplicate_names_are_allowed() {
    let mut c = compiler();
    c.rule("same", 1, |r| r.method("GET").respond(200)).unwrap();
    c.rule("same", 2, |r| r.method("POST").respond(200)).unwrap();
    assert_eq!(c.len(), 2);
    assert_eq!(c.rules().get("same").map(Rule::priority), Some(1));
}

#[test]
fn weights_need_not_sum_to_hundred() {
    let mut c = compiler();
    let rule = c
        .rule("odd-split", 1, |r| {
            r.method("GET")
                .forward_weighted("a", 1)
                .forward_weighted("b", 1)
                .forward_weighted("c", 250)
        })
        .unwrap();
    let weights: Vec<u32> = rule.action().target_groups().iter().map(|t| t.weight).collect();
    assert_eq!(weights, vec![1, 1, 250]);
}

#[test]
fn same_target_twice_is_kept() {
    let mut c = compiler();
    let rule = c
        .rule("twice", 1, |r| {
            r.method("GET")
                .forward_weighted("a", 50)
                .forward_weighted("a", 50)
        })
        .unwrap();
    assert_eq!(rule.action().target_groups().len(), 2);
}

#[test]
fn unusual_status_codes_accepted() {
    let mut c = compiler();
    let rule = c.rule("teapot", 1, |r| r.method("GET").respond(999)).unwrap();
    assert_eq!(rule.action(), &Action::FixedResponse { status_code: 999 });
}

#[test]
fn method_is_case_insensitive() {
    let mut c = compiler();
    let rule = c.rule("lower", 1, |r| r.method("get").respond(200)).unwrap();
    assert_eq!(rule.criteria(), &MatchCriteria::Method(HttpMethod::Get));
}

#[test]
fn unknown_method_rejected() {
    let mut c = compiler();
    let err = c.rule("bad", 1, |r| r.method("BREW").respond(200)).unwrap_err();
    assert!(matches!(err, RuleError::InvalidMatchSpec { .. }));
    assert!(c.is_empty());
}

#[test]
fn unknown_header_operator_rejected_not_dropped() {
    let mut c = compiler();
    let err = c
        .rule("bad-op", 1, |r| {
            r.header(HeaderMatchSpec::exact("x-a", "1"))
                .header(HeaderMatchSpec::new("x-b", "REGEX", ".*"))
                .respond(200)
        })
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid match in rule 'bad-op': unrecognized operator 'REGEX' for header 'x-b'"
    );
    assert!(c.is_empty());
}

#[test]
fn unknown_path_match_type_rejected() {
    let mut c = compiler();
    let err = c
        .add_rule(RuleSpec::new("bad-path", 1, 200).path_match(PathMatchSpec::new("SUFFIX", "/x")))
        .unwrap_err();
    assert!(matches!(err, RuleError::InvalidMatchSpec { .. }));
}

#[test]
fn empty_header_list_rejected() {
    let mut c = compiler();
    let err = c
        .add_rule(RuleSpec::new("no-headers", 1, 200).header_matches(Vec::new()))
        .unwrap_err();
    assert!(matches!(err, RuleError::InvalidMatchSpec { .. }));
}

#[test]
fn multiple_header_matches_kept_in_order() {
    let mut c = compiler();
    let rule = c
        .rule("hdrs", 1, |r| {
            r.header(HeaderMatchSpec::prefix("x-a", "v1"))
                .header(HeaderMatchSpec::contains("x-b", "v2").case_sensitive(true))
                .respond(200)
        })
        .unwrap();
    let MatchCriteria::Headers(headers) = rule.criteria() else {
        panic!("expected header match");
    };
    assert_eq!(headers[0].name, "x-a");
    assert_eq!(headers[0].matcher, HeaderValueMatch::Prefix("v1".into()));
    assert!(!headers[0].case_sensitive);
    assert_eq!(headers[1].name, "x-b");
    assert!(headers[1].case_sensitive);
}

#[test]
fn empty_forward_rejected() {
    let mut c = compiler();
    let err = c
        .add_rule(RuleSpec::new("nowhere", 1, Vec::<TargetReference>::new()).method_match("GET"))
        .unwrap_err();
    assert_eq!(
        err,
        RuleError::EmptyAction {
            rule: "nowhere".into()
        }
    );
}

#[test]
fn many_rules() {
    let mut c = compiler();
    for i in 0..200_u32 {
        c.rule(&format!("r{i}"), i * 3, |r| r.path_prefix(format!("/p{i}")).forward("tg"))
            .unwrap();
    }
    assert_eq!(c.len(), 200);
    for i in 0..200_u32 {
        assert!(c
            .rule(&format!("dup{i}"), i * 3, |r| r.method("GET").respond(200))
            .is_err());
    }
    assert_eq!(c.len(), 200);
}
