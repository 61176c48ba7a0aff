use crate::locations::error::LocationSourceError;
use crate::locations::source::LocationSource;
use crate::types::location::Location;
use async_trait::async_trait;

/// A fixed location set, typically taken from the `[[locations]]` tables of the config file.
#[derive(Debug, Clone, Default)]
pub struct StaticLocations {
    locations: Vec<Location>,
}

impl StaticLocations {
    /// Wraps `locations`, rejecting the set if any entry has out-of-range coordinates.
    pub fn new(locations: Vec<Location>) -> Result<Self, LocationSourceError> {
        validate_all(&locations)?;
        Ok(Self { locations })
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

#[async_trait]
impl LocationSource for StaticLocations {
    async fn all_locations(&self) -> Result<Vec<Location>, LocationSourceError> {
        Ok(self.locations.clone())
    }
}

pub(crate) fn validate_all(locations: &[Location]) -> Result<(), LocationSourceError> {
    for location in locations {
        location
            .validate()
            .map_err(|message| LocationSourceError::InvalidCoordinates {
                id: location.id.clone(),
                message,
            })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_configured_locations_in_order() -> Result<(), LocationSourceError> {
        let source = StaticLocations::new(vec![
            Location::new("ber", "Berlin", 52.52, 13.41),
            Location::new("par", "Paris", 48.85, 2.35),
        ])?;
        assert_eq!(source.len(), 2);

        let locations = source.all_locations().await?;
        let names: Vec<&str> = locations.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Berlin", "Paris"]);
        Ok(())
    }

    #[test]
    fn test_rejects_invalid_coordinates() {
        let result = StaticLocations::new(vec![Location::new("bad", "Bad", 120.0, 0.0)]);
        match result {
            Err(LocationSourceError::InvalidCoordinates { id, .. }) => assert_eq!(id, "bad"),
            other => panic!("expected InvalidCoordinates, got {other:?}"),
        }
    }
}
