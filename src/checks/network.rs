use crate::checks::{CheckResult, CheckValue, Comparator, Predicate, evaluate_resource};
use crate::config::NetworkExpectations;
use crate::models::gcp::NetworkDescriptor;
use chrono::{DateTime, Utc};

pub fn network_resource_name(network_name: &str) -> String {
    format!("network/{network_name}")
}

/// `now` anchors the age check: the network must have been created after `now - max_age_days`.
pub fn network_predicates(expectations: &NetworkExpectations, now: DateTime<Utc>) -> Vec<Predicate<NetworkDescriptor>> {
    vec![
        Predicate::new(
            "subnetworks.count",
            |n: &NetworkDescriptor| Some(n.subnetworks_count.into()),
            Comparator::LessThan,
            expectations.max_subnetworks,
        ),
        Predicate::new(
            "creation_timestamp_date",
            |n: &NetworkDescriptor| n.creation_timestamp.map(CheckValue::from),
            Comparator::GreaterThan,
            expectations
                .oldest_creation_date(now)
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
        ),
        Predicate::new(
            "routing_config.routing_mode",
            |n: &NetworkDescriptor| n.routing_mode.clone().map(CheckValue::from),
            Comparator::Equals,
            expectations.routing_mode.as_str(),
        ),
    ]
}

pub fn check_network(
    network_name: &str,
    expectations: &NetworkExpectations,
    now: DateTime<Utc>,
    network: Option<&NetworkDescriptor>,
) -> Vec<CheckResult> {
    evaluate_resource(
        &network_resource_name(network_name),
        network,
        &network_predicates(expectations, now),
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::checks::CheckOutcome;
    use chrono::{Duration, TimeZone};

    pub(crate) fn compliant_network(name: &str, now: DateTime<Utc>) -> NetworkDescriptor {
        NetworkDescriptor {
            name: name.to_string(),
            subnetworks_count: 4,
            creation_timestamp: Some(now - Duration::days(30)),
            routing_mode: Some("REGIONAL".to_string()),
        }
    }

    fn outcome_of(results: &[CheckResult], name: &str) -> CheckOutcome {
        results
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.outcome)
            .unwrap_or_else(|| panic!("no check named {name}"))
    }

    #[test]
    fn test_compliant_network_passes_every_check() {
        // setup:
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();

        // execute:
        let results = check_network(
            "vpc-network",
            &NetworkExpectations::default(),
            now,
            Some(&compliant_network("vpc-network", now)),
        );

        // verify:
        assert_eq!(4, results.len());
        assert!(results.iter().all(|r| r.outcome == CheckOutcome::Passed));
        assert!(results.iter().all(|r| r.resource == "network/vpc-network"));
    }

    #[test]
    fn test_subnetworks_count_boundary() {
        // setup:
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();

        for (subnetworks_count, expected_outcome) in [
            (0, CheckOutcome::Passed),
            (29, CheckOutcome::Passed),
            (30, CheckOutcome::Failed),
            (31, CheckOutcome::Failed),
        ] {
            let network = NetworkDescriptor {
                subnetworks_count,
                ..compliant_network("vpc-network", now)
            };

            // execute:
            let results = check_network("vpc-network", &NetworkExpectations::default(), now, Some(&network));

            // verify:
            assert_eq!(
                expected_outcome,
                outcome_of(&results, "subnetworks.count"),
                "subnetworks count: {subnetworks_count}"
            );
        }
    }

    #[test]
    fn test_creation_timestamp_boundary() {
        // setup:
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();

        for (age, expected_outcome) in [
            (Duration::days(3649), CheckOutcome::Passed),
            (Duration::days(3650) - Duration::seconds(1), CheckOutcome::Passed),
            (Duration::days(3650), CheckOutcome::Failed),
            (Duration::days(3651), CheckOutcome::Failed),
        ] {
            let network = NetworkDescriptor {
                creation_timestamp: Some(now - age),
                ..compliant_network("vpc-network", now)
            };

            // execute:
            let results = check_network("vpc-network", &NetworkExpectations::default(), now, Some(&network));

            // verify:
            assert_eq!(
                expected_outcome,
                outcome_of(&results, "creation_timestamp_date"),
                "network age: {age}"
            );
        }
    }

    #[test]
    fn test_unrepresentable_max_age_does_not_panic() {
        // setup:
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let expectations = NetworkExpectations {
            max_age_days: 100_000_000,
            ..Default::default()
        };

        // execute:
        let results = check_network(
            "vpc-network",
            &expectations,
            now,
            Some(&compliant_network("vpc-network", now)),
        );

        // verify:
        assert_eq!(CheckOutcome::Passed, outcome_of(&results, "creation_timestamp_date"));
    }

    #[test]
    fn test_network_without_creation_timestamp_or_routing_mode() {
        // setup:
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let network = NetworkDescriptor {
            name: "legacy".to_string(),
            subnetworks_count: 0,
            creation_timestamp: None,
            routing_mode: None,
        };

        // execute:
        let results = check_network("legacy", &NetworkExpectations::default(), now, Some(&network));

        // verify:
        assert_eq!(CheckOutcome::Passed, outcome_of(&results, "subnetworks.count"));
        assert_eq!(CheckOutcome::Failed, outcome_of(&results, "creation_timestamp_date"));
        assert_eq!(CheckOutcome::Failed, outcome_of(&results, "routing_config.routing_mode"));
    }

    #[test]
    fn test_global_routing_mode_fails() {
        // setup:
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let network = NetworkDescriptor {
            routing_mode: Some("GLOBAL".to_string()),
            ..compliant_network("vpc-network", now)
        };

        // execute:
        let results = check_network("vpc-network", &NetworkExpectations::default(), now, Some(&network));

        // verify:
        assert_eq!(CheckOutcome::Failed, outcome_of(&results, "routing_config.routing_mode"));
        assert_eq!(
            Some(CheckValue::Text("GLOBAL".to_string())),
            results
                .iter()
                .find(|r| r.name == "routing_config.routing_mode")
                .and_then(|r| r.actual.clone())
        );
    }
}
