//! Dummy data generation for the dashboard
//!
//! Builds requirements, test cases, runs, defects, summaries and metrics from
//! fixed vocabularies and inserts them through the regular ingestion
//! handlers, so existing keys are skipped rather than reported as errors.

use chrono::{Duration, NaiveDateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::api::models::{
    DefectPayload, RequirementPayload, TestCasePayload, TestRunPayload, TestTypeSummaryPayload, TransitMetricPayload,
};
use crate::db::repositories::{RequirementRepository, TestCaseRepository};
use crate::db::{DatabasePool, DbResult};
use crate::ingest::{records, Outcome};

const REQUIREMENT_ID_PREFIXES: &[&str] = &[
    "F-FVM", "F-GATE", "F-BUS", "F-ALL", "TC-F-FV", "TC-F-GA", "BU", "NF-GATE", "NF-ALL", "NF-FV",
];
const TITLES: &[&str] = &[
    "Purchase TransitCard using FVM",
    "Reload Card or Add Value",
    "FVM should accept Credit and Debit",
    "FVM should accept Cash as payment",
    "Generate Transaction Receipt",
    "Receipt should contain transaction ID, amount",
    "Tap Credit Card with balance on Gate",
    "Gate Reader should be able to tap",
    "Reject Invalid Card on Gate",
    "Identify Entry and Exit on Bus",
    "Send Transaction to Backend",
    "Store offline transactions",
    "Fast transaction completion",
    "High Volume gate processing",
    "Secure stored and transmitted data",
    "FVM Should timeout after 30 seconds",
    "FVM should retry card processing up",
    "FVM should lock screen when service is not available",
    "FVM Should maintain a transaction History",
    "Gate reader should log every successful otp",
    "Gate reader LED should flash red",
    "Gate reader should display card type",
    "Gate reader should log every rejection",
    "Bus reader should store boarding location",
    "Bus reader should detect direction",
];
const DESCRIPTIONS: &[&str] = &[
    "User should be able to purchase a smartcard using FVM",
    "User should be able to add value to card",
    "user should be able to reload card",
    "user should be able to purchase a monthly pass",
    "FVM should accept credit and debit cards as payment methods",
    "FVM should accept cash as payment method",
    "FVM should be able to generate a receipt",
    "Receipt should contain transaction ID, amount paid, card id, payment method, date and time",
    "Gate reader should be able to read DesFire,MiFare, credit card and barcode",
    "Bus reader should be able to determine entry vs exit taps",
    "All devices should send transaction immediately to backend server",
    "Gate reader should be able to process minimum of 500k transactions per day without getting stuck",
    "Users should be able to check balance before purchase",
    "FVM should timeout after 30 seconds of inactivity",
    "FVM should lock screen when service mode is active",
    "FVM should show error messages for card read failures",
    "FVM should allow refund option if transaction fails",
    "gate reader should log every successful tap with timestamp",
    "Gate reader should retry backend sync every 30 seconds if offline",
    "Gate reader LED should flash green on success",
    "Gate Reader LED should Flash red on failure",
    "Bus reader should store boarding location on entry",
    "Bus reader should detect direction of tap using GPS Zone",
];
const COMPONENTS: &[&str] = &["FVM", "Gate Reader", "Bus Reader", "ALL"];
const PRIORITIES: &[&str] = &["Low", "Medium", "High"];
const REQUIREMENT_STATUSES: &[&str] = &[
    "Accepted",
    "Rejected",
    "In Review",
    "Design Completed",
    "Implementation Completed",
    "Testing Completed",
    "Done",
];
const TEST_TYPES: &[&str] = &["Feature", "Regression"];
const TEST_STATUSES: &[&str] = &["In review", "Approved", "Draft"];
const CREATED_BY_USERS: &[&str] = &["automation_bot", "qa_user1", "qa_user2", "qa_user3"];
const TEST_RESULTS: &[&str] = &["Pass", "Fail"];
const REMARKS: &[&str] = &[
    "Screen not responsive",
    "Test Passed Smoothly",
    "Incorrect result shown",
    "All Steps Passed",
    "Minor Delay Observed",
    "Card Not Detected",
    "Mechanical Arm Misaligned",
];
const DEFECT_TITLES: &[&str] = &[
    "NFC Module Not Initializing",
    "Card Tap Not registered",
    "Screen Freeze During Payment",
    "Receipt Not Printed",
    "Wrong Fare Deducted",
    "Timeout during card reload",
    "Gate shows GO on insufficient balance",
    "Incorrect Balance shown after reload",
    "Crash on selecting monthly pass",
];
const SEVERITIES: &[&str] = &["Low", "Medium", "High"];
const DEFECT_STATUSES: &[&str] = &["Open", "Closed", "In-Progress", "Resolved"];
const SUMMARY_TEST_TYPES: &[&str] = &[
    "Stress Test-Bus Readers",
    "Scalability Test-Backend",
    "Memory Usage Test - Controller",
    "Load Test - Gate Readers",
    "Battery Drain Test - Robot",
    "Response Time Validation - All Devices",
    "Performance Test - FVM",
    "Latency Test - NFC Tap",
];
const METRICS: &[&str] = &[
    "Average Response Time",
    "CPU Utilization",
    "Recovery Time From Crash",
    "Transaction Completion Time",
    "Concurrent Sessions Handled",
    "Max Transactions per hour",
    "Battery Usage per hour",
    "System Up time",
    "Memory Usage",
];
const NOTES: &[&str] = &[
    "All Systems Stable",
    "FVMs under maintenance in Zone B",
    "Normal Operation",
    "Observed High Tap Volume at metro line 3",
    "Minor Delay in gate Readers",
    "Bus Taps Errors Observed",
    "Data Incomplete Due to network Issue",
    "Few gate rejections due to hotlisted cards",
];
const PRECONDITIONS: &[&str] = &[
    "Fare Vending Machine is operational and the Maintainer has a valid login card and PIN.",
    "FVM is operational. An invalid card or incorrect PIN is used.",
    "FVM is operational and patron has valid account-based card and credit/debit method.",
    "FVM is operational. Invalid token/card or authorization failure occurs.",
    "FVM is operational and patron has a valid card.",
    "FVM is online and alarm triggers occur.",
    "FVM components must be operational or fail during test.",
    "Revenue collector must be present with access card.",
    "Maintainer must be logged into the device.",
    "C&C and Monitoring system are connected to FVM.",
    "FVM is on and ready to accept input.",
    "User has a valid smart card.",
    "User taps a non-functional or invalid card.",
    "Simulation environment is configured for stress testing.",
];
const TEST_STEPS: &[&str] = &[
    "1. Verify that the Fare Vending Machine displays the login screen for maintenance mode.\n2. Tap a valid Maintainer card and initiate login.\n3. Enter the correct PIN using the keypad.\n4. Verify that the FVM authenticates the Maintainer login.\n5. Verify that the Maintenance screen is displayed to the Maintainer.",
    "1. Launch the Fare Vending Machine and wait for the login screen.\n2. Tap an unauthorized Maintainer card or enter an invalid PIN.\n3. Verify that the system displays an error message for failed login.\n4. Confirm that the maintenance screen is not shown.",
    "1. Select preferred language on the Fare Vending Machine.\n2. Choose 'Add Product' option.\n3. Tap the account-based smart card on the reader.\n4. Select the desired product to purchase.\n5. Choose payment method as Credit/Debit or Mobile Wallet.\n6. Confirmation is shown and receipt is printed.",
    "1. Attempt to add product using an invalid account-based card or payment method.\n2. Proceed through product selection.\n3. Tap card for payment but simulate card rejection or timeout.\n4. Verify that the machine shows an error and cancels transaction.",
    "1. Simulate a power failure or vibration or key alarm timeout.\n2. Component error screen is displayed.\n3. UI is updated with Service Indicator for staff awareness.\n4. Notification is sent to back-office.",
    "1. Select fare product on screen.\n2. Insert coins or bills as shown on the payment screen.\n3. FVM collects and confirms the value.\n4. If value is accepted, payment is confirmed and transaction completes.\n5. Receipt is printed, and change is dispensed if applicable.",
];
const EXPECTED_RESULTS: &[&str] = &[
    "Component is activated or deactivated successfully. All actions are logged, and appropriate UI feedback is shown.",
    "Maintainer login fails. Component control options are not shown. No activation/deactivation occurs or is logged.",
    "Product is successfully loaded, transaction is authorized, and receipt is issued.",
    "Transaction fails. Product is not loaded and error message is displayed.",
    "Fare product is written to card and transaction is confirmed.",
    "Alarm is captured, displayed, and reported to backend.",
    "Fault is shown on screen and logged in backend system.",
    "Authorization result displayed within 2 seconds.",
];

/// Test-case groups: (component, requirement prefix, id prefix, titles, count)
const TEST_CASE_GROUPS: &[(&str, &str, &str, &[&str], usize)] = &[
    (
        "FVM",
        "FVM",
        "TC-F",
        &[
            "Verify: User should be able to purchase a SmartCard using FVM.",
            "Verify: User should be able to add value to the card.",
            "Verify: FVM should accept Credit and Debit cards as payment methods.",
            "Verify: FVM should accept Cash as payment method.",
            "Verify: FVM should be able to generate a receipt.",
        ],
        3,
    ),
    (
        "GATE READER",
        "GATE",
        "TC-F",
        &[
            "Verify: Gate Reader should be able to read DesFire, MiFare, Credit card and Barcode.",
            "Verify: Gate Reader should be able to show the transaction result even if it loses connection with backend server.",
            "Verify: Gate Reader should reject cards with insufficient balance, expired card, hotlisted card, or those tapped multiple times within the passback time limit.",
        ],
        3,
    ),
    (
        "BUS READER",
        "BUS",
        "TC-F",
        &["Verify: Bus Reader should be able to determine Entry vs Exit taps."],
        2,
    ),
    (
        "ALL",
        "ALL",
        "TC-F",
        &[
            "Verify: All devices should send the transaction immediately to backend server.",
            "Verify: All devices should store transactions locally in the event of a communication failure with the backend server.",
        ],
        2,
    ),
    (
        "GATE READER",
        "NF-GATE",
        "TC-NF",
        &[
            "Verify: Gate Reader should complete the transaction within 500 ms.",
            "Verify: Gate Reader should be able to process minimum of 500k transactions per day without getting stuck.",
        ],
        2,
    ),
];

const REQUIREMENT_COUNT: usize = 10;
const TEST_RUN_COUNT: usize = 20;
const DEFECT_COUNT: usize = 10;
const METRIC_DAYS: i64 = 7;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Rows inserted and skipped for one table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedCounts {
    pub inserted: usize,
    pub skipped: usize,
}

impl SeedCounts {
    fn record<T>(&mut self, outcome: Outcome<T>) {
        match outcome {
            Outcome::Created(_) => self.inserted += 1,
            Outcome::Duplicate(_) => self.skipped += 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub requirements: SeedCounts,
    pub test_cases: SeedCounts,
    pub test_runs: SeedCounts,
    pub defects: SeedCounts,
    pub test_type_summaries: SeedCounts,
    pub transit_metrics: SeedCounts,
}

impl SeedReport {
    fn all(&self) -> [SeedCounts; 6] {
        [
            self.requirements,
            self.test_cases,
            self.test_runs,
            self.defects,
            self.test_type_summaries,
            self.transit_metrics,
        ]
    }

    pub fn total_inserted(&self) -> usize {
        self.all().iter().map(|c| c.inserted).sum()
    }

    pub fn total_skipped(&self) -> usize {
        self.all().iter().map(|c| c.skipped).sum()
    }
}

fn pick<'a, R: Rng>(rng: &mut R, values: &[&'a str]) -> &'a str {
    values.choose(rng).copied().unwrap_or_default()
}

fn pick_some<R: Rng>(rng: &mut R, values: &[&str]) -> Option<String> {
    Some(pick(rng, values).to_string())
}

/// Generate and insert a full set of dummy rows
pub async fn generate<R: Rng + Send>(pool: &DatabasePool, rng: &mut R) -> DbResult<SeedReport> {
    let mut report = SeedReport::default();
    let now = Utc::now().naive_utc();

    for _ in 0..REQUIREMENT_COUNT {
        let payload = requirement(rng, now);
        report.requirements.record(records::create_requirement(pool, payload).await?);
    }

    let requirement_ids: Vec<String> = RequirementRepository::list(pool)
        .await?
        .into_iter()
        .map(|r| r.requirement_id)
        .collect();
    for (component, requirement_prefix, id_prefix, titles, count) in TEST_CASE_GROUPS {
        for _ in 0..*count {
            let payload = test_case(rng, now, component, requirement_prefix, id_prefix, titles, &requirement_ids);
            report.test_cases.record(records::create_test_case(pool, payload).await?);
        }
    }

    let test_case_ids: Vec<String> = TestCaseRepository::list(pool)
        .await?
        .into_iter()
        .map(|tc| tc.test_case_id)
        .collect();
    if !test_case_ids.is_empty() {
        for _ in 0..TEST_RUN_COUNT {
            let payload = test_run(rng, now, &test_case_ids);
            report.test_runs.record(records::create_test_run(pool, payload).await?);
        }
        for _ in 0..DEFECT_COUNT {
            let payload = defect(rng, now, &test_case_ids);
            report.defects.record(records::create_defect(pool, payload).await?);
        }
    }

    for test_type in SUMMARY_TEST_TYPES {
        let payload = summary(rng, now, test_type);
        report
            .test_type_summaries
            .record(records::create_test_type_summary(pool, payload).await?);
    }

    for day in 0..METRIC_DAYS {
        let payload = metric(rng, now - Duration::days(day));
        report.transit_metrics.record(records::create_transit_metric(pool, payload).await?);
    }

    info!(
        inserted = report.total_inserted(),
        skipped = report.total_skipped(),
        "Dummy data generated"
    );
    Ok(report)
}

fn requirement<R: Rng>(rng: &mut R, now: NaiveDateTime) -> RequirementPayload {
    RequirementPayload {
        requirement_id: Some(format!("{}-{:03}", pick(rng, REQUIREMENT_ID_PREFIXES), rng.gen_range(100..=999))),
        title: pick_some(rng, TITLES),
        description: pick_some(rng, DESCRIPTIONS),
        component: pick_some(rng, COMPONENTS),
        priority: pick_some(rng, PRIORITIES),
        status: pick_some(rng, REQUIREMENT_STATUSES),
        jira_id: Some(format!("JIRA-{}", rng.gen_range(1000..=9999))),
        created_at: Some(now.format(TIMESTAMP_FORMAT).to_string()),
    }
}

fn test_case<R: Rng>(
    rng: &mut R,
    now: NaiveDateTime,
    component: &str,
    requirement_prefix: &str,
    id_prefix: &str,
    titles: &[&str],
    requirement_ids: &[String],
) -> TestCasePayload {
    let id_part = format!("{:03}", rng.gen_range(0..=999));
    let sub_id_part = format!("{:02}", rng.gen_range(0..=99));
    let test_case_id = format!("{}-{}-{}-{}", id_prefix, component.replace(' ', "-"), id_part, sub_id_part);
    let requirement_id = match requirement_ids.choose(rng) {
        Some(id) => id.clone(),
        None => format!("F-{}-{}", requirement_prefix, id_part),
    };

    TestCasePayload {
        test_case_id: Some(test_case_id),
        title: pick_some(rng, titles),
        test_type: pick_some(rng, TEST_TYPES),
        component: Some(component.to_string()),
        requirement_id: Some(requirement_id),
        status: pick_some(rng, TEST_STATUSES),
        created_by: pick_some(rng, CREATED_BY_USERS),
        created_at: Some(now.format(TIMESTAMP_FORMAT).to_string()),
        pre_condition: pick_some(rng, PRECONDITIONS),
        test_steps: pick_some(rng, TEST_STEPS),
        expected_result: pick_some(rng, EXPECTED_RESULTS),
    }
}

fn test_run<R: Rng>(rng: &mut R, now: NaiveDateTime, test_case_ids: &[String]) -> TestRunPayload {
    TestRunPayload {
        test_case_id: test_case_ids.choose(rng).cloned(),
        execution_date: Some(now.format("%d-%m-%Y %H:%M").to_string()),
        result: pick_some(rng, TEST_RESULTS),
        observed_time: Some(rng.gen_range(100..=9999)),
        executed_by: Some(format!("Robot_Unit_0{}", rng.gen_range(0..=9))),
        remarks: pick_some(rng, REMARKS),
        ..Default::default()
    }
}

fn defect<R: Rng>(rng: &mut R, now: NaiveDateTime, test_case_ids: &[String]) -> DefectPayload {
    let reporter = pick(rng, &["qa_user", "Robot_Unit"]);
    let fixed_after =
        Duration::days(rng.gen_range(1..=30)) + Duration::hours(rng.gen_range(1..=23)) + Duration::minutes(rng.gen_range(1..=59));

    DefectPayload {
        defect_id: Some(uuid::Uuid::new_v4().to_string()),
        title: pick_some(rng, DEFECT_TITLES),
        severity: pick_some(rng, SEVERITIES),
        status: pick_some(rng, DEFECT_STATUSES),
        test_case_id: test_case_ids.choose(rng).cloned(),
        reported_by: Some(format!("{}_{:02}", reporter, rng.gen_range(1..=9))),
        created_at: Some(now.format(TIMESTAMP_FORMAT).to_string()),
        fixed_at: Some((now + fixed_after).format(TIMESTAMP_FORMAT).to_string()),
    }
}

/// Expected/actual values shaped after the metric's unit
fn metric_values<R: Rng>(rng: &mut R, metric: &str) -> (String, String) {
    let (template, actual) = if metric.contains("Response Time") || metric.contains("Completion Time") {
        (pick(rng, &["<=xxxms", "<xxxms"]), format!("{}ms", rng.gen_range(10..=1000)))
    } else if metric.contains("CPU Utilization") || metric.contains("Battery Usage") {
        ("<=xx%", format!("{:.2}%", rng.gen_range(10.0..95.0)))
    } else if metric.contains("Recovery Time") {
        ("<xxxms", format!("{:.1}s", rng.gen_range(1.0..10.0)))
    } else if metric.contains("Concurrent Sessions") || metric.contains("Max Transactions") {
        (">=xxxx", rng.gen_range(100..=5000).to_string())
    } else if metric.contains("System Up time") {
        (">=xx.xx%", format!("{:.2}%", rng.gen_range(99.0..99.99)))
    } else {
        ("<=x.xGB", format!("{:.2}GB", rng.gen_range(0.1..2.5)))
    };

    let expected = template
        .replace("xxx", &rng.gen_range(100..=500).to_string())
        .replace("xx", &rng.gen_range(1..=99).to_string())
        .replace('x', &rng.gen_range(1..=5).to_string());
    (expected, actual)
}

fn summary<R: Rng>(rng: &mut R, now: NaiveDateTime, test_type: &str) -> TestTypeSummaryPayload {
    let metric = pick(rng, METRICS);
    let (expected, actual) = metric_values(rng, metric);
    let test_date = now - Duration::days(rng.gen_range(0..=30));

    TestTypeSummaryPayload {
        test_type: Some(test_type.to_string()),
        metrics: Some(metric.to_string()),
        expected: Some(expected),
        actual: Some(actual),
        status: pick_some(rng, TEST_RESULTS),
        test_date: Some(test_date.format("%Y-%m-%d").to_string()),
    }
}

fn metric<R: Rng>(rng: &mut R, day: NaiveDateTime) -> TransitMetricPayload {
    let fvm_transactions = if rng.gen_bool(0.5) {
        rng.gen_range(100..=999)
    } else {
        rng.gen_range(1000..=9999)
    };
    let gate_taps = if rng.gen_bool(0.5) {
        rng.gen_range(1000..=9999)
    } else {
        rng.gen_range(10000..=50000)
    };
    let rate = |rng: &mut R| (rng.gen_range(90.0..99.99_f64) * 100.0).round() / 100.0;

    TransitMetricPayload {
        date: Some(day.format("%Y-%m-%d").to_string()),
        fvm_transactions: Some(fvm_transactions),
        gate_taps: Some(gate_taps),
        bus_taps: Some(rng.gen_range(1000..=9999)),
        success_rate_gate: Some(rate(rng)),
        success_rate_bus: Some(rate(rng)),
        avg_response_time: Some(rng.gen_range(50..=500)),
        defect_count: Some(rng.gen_range(0..=9)),
        notes: pick_some(rng, NOTES),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{DefectRepository, TestRunRepository, TransitMetricRepository};
    use crate::db::DatabaseConnection;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[tokio::test]
    async fn test_generate_populates_every_table() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let report = generate(conn.pool(), &mut rng).await.unwrap();

        assert_eq!(report.requirements.inserted + report.requirements.skipped, REQUIREMENT_COUNT);
        assert_eq!(report.test_runs.inserted, TEST_RUN_COUNT);
        assert_eq!(report.defects.inserted, DEFECT_COUNT);
        assert_eq!(report.test_type_summaries.inserted + report.test_type_summaries.skipped, SUMMARY_TEST_TYPES.len());
        assert_eq!(report.transit_metrics.inserted, METRIC_DAYS as usize);
        assert_eq!(TestRunRepository::count(conn.pool()).await.unwrap(), TEST_RUN_COUNT as i64);
    }

    #[tokio::test]
    async fn test_second_run_skips_existing_days() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        generate(conn.pool(), &mut rng).await.unwrap();
        let second = generate(conn.pool(), &mut rng).await.unwrap();

        assert_eq!(second.transit_metrics.skipped, METRIC_DAYS as usize);
        assert_eq!(TransitMetricRepository::count(conn.pool()).await.unwrap(), METRIC_DAYS);
    }

    #[tokio::test]
    async fn test_defects_are_fixed_after_creation() {
        let conn = DatabaseConnection::in_memory().await.unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        generate(conn.pool(), &mut rng).await.unwrap();

        for defect in DefectRepository::list(conn.pool()).await.unwrap() {
            let created = NaiveDateTime::parse_from_str(defect.created_at.as_deref().unwrap(), TIMESTAMP_FORMAT).unwrap();
            let fixed = NaiveDateTime::parse_from_str(defect.fixed_at.as_deref().unwrap(), TIMESTAMP_FORMAT).unwrap();
            assert!(fixed > created);
        }
    }

    #[test]
    fn test_metric_values_match_unit() {
        let mut rng = StdRng::seed_from_u64(1);
        let (expected, actual) = metric_values(&mut rng, "Memory Usage");
        assert!(expected.starts_with("<="));
        assert!(expected.ends_with("GB"));
        assert!(actual.ends_with("GB"));

        let (expected, actual) = metric_values(&mut rng, "Average Response Time");
        assert!(expected.ends_with("ms"));
        assert!(actual.ends_with("ms"));
    }

    #[test]
    fn test_requirement_id_shape() {
        let mut rng = StdRng::seed_from_u64(5);
        let payload = requirement(&mut rng, Utc::now().naive_utc());
        let id = payload.requirement_id.unwrap();
        let (prefix, number) = id.rsplit_once('-').unwrap();
        assert!(REQUIREMENT_ID_PREFIXES.contains(&prefix));
        assert_eq!(number.len(), 3);
        assert!(payload.jira_id.unwrap().starts_with("JIRA-"));
    }
}
