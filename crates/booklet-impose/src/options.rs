use crate::constants::{DEFAULT_PAGE_MARGIN_MM, DEFAULT_SIG_PAIR};
use crate::plan::SignaturePair;
use crate::types::{ImposeError, Result};

/// Imposition configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImposeOptions {
    /// Allowed signature-size pairs, searched in order by the planner
    pub pairs: Vec<SignaturePair>,
    /// Inset applied by the renderer inside each panel box, millimeters
    pub page_margin_mm: f32,
}

impl Default for ImposeOptions {
    fn default() -> Self {
        let (large, small) = DEFAULT_SIG_PAIR;
        Self {
            pairs: vec![SignaturePair { large, small }],
            page_margin_mm: DEFAULT_PAGE_MARGIN_MM,
        }
    }
}

impl ImposeOptions {
    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.pairs.is_empty() {
            return Err(ImposeError::NoPairs);
        }
        for pair in &self.pairs {
            pair.validate()?;
        }
        if self.page_margin_mm < 0.0 {
            return Err(ImposeError::Config(
                "Page margin must be non-negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| ImposeError::Config(format!("Failed to parse config: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ImposeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_are_valid() {
        assert!(ImposeOptions::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        let mut options = ImposeOptions::default();
        options.pairs.clear();
        assert!(matches!(options.validate(), Err(ImposeError::NoPairs)));

        let mut options = ImposeOptions::default();
        options.pairs.push(SignaturePair {
            large: 30,
            small: 28,
        });
        assert!(matches!(
            options.validate(),
            Err(ImposeError::InvalidPair { .. })
        ));

        let options = ImposeOptions {
            page_margin_mm: -1.0,
            ..Default::default()
        };
        assert!(matches!(options.validate(), Err(ImposeError::Config(_))));
    }
}
