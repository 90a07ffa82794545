//! Fault overlay projection.

use quake_map_analytics_models::FaultOverlay;
use quake_map_event_models::FaultFeature;

/// Converts fault features into named overlays with popup text.
///
/// Features without any coordinates are dropped.
#[must_use]
pub fn project_faults(faults: &[FaultFeature]) -> Vec<FaultOverlay> {
    faults
        .iter()
        .filter(|f| f.lines.iter().any(|line| !line.is_empty()))
        .map(|fault| {
            let name = fault.display_name().to_string();
            FaultOverlay {
                popup: format!("Fault: {name}"),
                name,
                lines: fault.lines.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use quake_map_event_models::Coordinate;

    use super::*;

    fn trace() -> Vec<Vec<Coordinate>> {
        vec![vec![
            Coordinate {
                longitude: 96.0,
                latitude: 16.5,
            },
            Coordinate {
                longitude: 96.1,
                latitude: 22.0,
            },
        ]]
    }

    #[test]
    fn named_and_unnamed_faults_get_popups() {
        let faults = vec![
            FaultFeature {
                name: Some("Sagaing Fault".to_string()),
                lines: trace(),
            },
            FaultFeature {
                name: None,
                lines: trace(),
            },
        ];

        let overlays = project_faults(&faults);
        assert_eq!(overlays[0].popup, "Fault: Sagaing Fault");
        assert_eq!(overlays[1].name, "Unknown");
        assert_eq!(overlays[1].popup, "Fault: Unknown");
    }

    #[test]
    fn empty_geometry_is_dropped() {
        let faults = vec![FaultFeature {
            name: Some("Kabaw Fault".to_string()),
            lines: vec![Vec::new()],
        }];
        assert!(project_faults(&faults).is_empty());
    }
}
