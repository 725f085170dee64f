//! Region index catalog used by the market summary.

/// Region used when the requested one is not in the catalog.
pub const DEFAULT_REGION: &str = "US";

const US: &[&str] = &["^GSPC", "^DJI", "^IXIC", "^RUT"];
const BR: &[&str] = &["^BVSP", "^IBOV", "^IFIX"];
const EU: &[&str] = &["^FCHI", "^GDAXI", "^FTSE"];
const ASIA: &[&str] = &["^N225", "^HSI", "^AXJO"];

/// Index symbols tracked for a region (case-insensitive), falling back to the US list.
pub fn region_indices(region: &str) -> &'static [&'static str] {
    match region.to_ascii_uppercase().as_str() {
        "US" => US,
        "BR" => BR,
        "EU" => EU,
        "ASIA" => ASIA,
        _ => US,
    }
}

/// Display name for an index symbol; unknown symbols are shown as-is.
pub fn index_name(symbol: &str) -> &str {
    match symbol {
        "^GSPC" => "S&P 500",
        "^DJI" => "Dow Jones",
        "^IXIC" => "NASDAQ",
        "^RUT" => "Russell 2000",
        "^BVSP" => "Bovespa",
        "^IBOV" => "Ibovespa",
        "^IFIX" => "IFIX",
        "^FCHI" => "CAC 40",
        "^GDAXI" => "DAX",
        "^FTSE" => "FTSE 100",
        "^N225" => "Nikkei 225",
        "^HSI" => "Hang Seng",
        "^AXJO" => "ASX 200",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_lookup() {
        assert_eq!(region_indices("US").len(), 4);
        assert_eq!(region_indices("br"), BR);
        assert_eq!(region_indices("ASIA")[0], "^N225");
    }

    #[test]
    fn test_unknown_region_falls_back_to_us() {
        assert_eq!(region_indices("MARS"), region_indices(DEFAULT_REGION));
    }

    #[test]
    fn test_index_names() {
        assert_eq!(index_name("^GSPC"), "S&P 500");
        assert_eq!(index_name("^XYZ"), "^XYZ");
    }
}
