use crate::shared_data::BridgeSnapshot;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// How bridge snapshots are shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFormat {
    /// Lane by lane, the way the console always printed it.
    Text,
    /// One JSON object per line.
    Json,
}

pub fn render(snapshot: &BridgeSnapshot, format: StatusFormat) -> Result<String, serde_json::Error> {
    match format {
        StatusFormat::Text => Ok(snapshot.to_string()),
        StatusFormat::Json => serde_json::to_string(snapshot),
    }
}

/// Prints every snapshot received on `rx` until all senders are gone.
/// Resolves to the number of snapshots printed.
pub fn spawn_status_printer(
    mut rx: mpsc::UnboundedReceiver<BridgeSnapshot>,
    format: StatusFormat,
) -> JoinHandle<usize> {
    tokio::spawn(async move {
        let mut printed = 0;
        while let Some(snapshot) = rx.recv().await {
            match render(&snapshot, format) {
                Ok(line) => {
                    println!("{}", line);
                    printed += 1;
                }
                Err(e) => log::warn!("Failed to render bridge status: {}", e),
            }
        }
        printed
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared_data::LaneSnapshot;
    use crate::simulation_engine::vehicles::Direction;

    fn full_bridge() -> BridgeSnapshot {
        BridgeSnapshot {
            weight: 12,
            capacity: 12,
            lane_one: LaneSnapshot {
                direction: Some(Direction::Forward),
                occupants: 4,
            },
            lane_two: LaneSnapshot {
                direction: Some(Direction::Reverse),
                occupants: 0,
            },
            in_transit: 9,
        }
    }

    #[test]
    fn json_round_trips() {
        let line = render(&full_bridge(), StatusFormat::Json).unwrap();
        assert!(!line.contains('\n'));
        let parsed: BridgeSnapshot = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed, full_bridge());
    }

    #[test]
    fn text_matches_display() {
        let text = render(&full_bridge(), StatusFormat::Text).unwrap();
        assert!(text.contains("Lane 2 direction and quantity: Southbound with 0 vehicles"));
    }

    #[tokio::test]
    async fn printer_stops_when_senders_drop() {
        let (tx, rx) = mpsc::unbounded_channel();
        let printer = spawn_status_printer(rx, StatusFormat::Json);
        tx.send(full_bridge()).unwrap();
        tx.send(full_bridge()).unwrap();
        drop(tx);
        assert_eq!(printer.await.unwrap(), 2);
    }
}
