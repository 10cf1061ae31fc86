//! Demonstrates library usage against synthetic data: a three-account
//! kickback cycle plus an ordinary merchant with many small customers (which
//! should not be flagged).

use chrono::{TimeZone, Utc};
use fraud_ring_analyzer::{analyze, RawRecord};

fn tx(sender: &str, receiver: &str, amount: f64, hour: i64) -> RawRecord {
    RawRecord {
        transaction_id: format!("{sender}-{receiver}-{hour}"),
        sender_id: sender.to_string(),
        receiver_id: receiver.to_string(),
        amount,
        timestamp: Utc.timestamp_opt(hour * 3600, 0).unwrap(),
    }
}

fn main() {
    env_logger::init();

    let mut records = vec![
        tx("ACC_A", "ACC_B", 9800.0, 1),
        tx("ACC_B", "ACC_C", 9700.0, 2),
        tx("ACC_C", "ACC_A", 9600.0, 3),
    ];

    for i in 0..50 {
        records.push(tx(&format!("CUSTOMER_{i}"), "MERCHANT", 42.50, 100 + i));
    }

    let report = analyze(records);
    println!("{}", report.to_json().expect("report serializes"));
}
