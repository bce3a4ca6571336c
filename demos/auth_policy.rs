use lattice_rules::policy::{flatten, AuthStatement};
use serde_json::json;

fn main() {
    let statements = [
        AuthStatement::allow("*")
            .principal(json!({"AWS": ["arn:aws:iam::111122223333:root"]}))
            .conditions(json!({"StringEquals": {"vpc-lattice-svcs:SourceVpc": "vpc-0abc"}})),
        AuthStatement::deny(vec![
            "arn:aws:vpc-lattice:us-east-1:111122223333:service/svc-0123/admin".to_owned(),
        ]),
    ];

    let policy = flatten(&statements);
    println!("{}", policy.to_json().expect("policy serializes"));
}
