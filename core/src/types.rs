//! Resource and format identifiers for the Dienas API.

use std::fmt;

/// A data resource exposed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Namedays,
    Banks,
    Countries,
    CurrencyRates,
}

impl Resource {
    /// Path segment used in the request URL.
    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Namedays => "namedays",
            Resource::Banks => "banks",
            Resource::Countries => "countries",
            Resource::CurrencyRates => "currencyrates",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialization format requested from the server.
///
/// The parsed form offered by `Request::as_parsed` is not a wire format: it
/// fetches `Json` and decodes it locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Xml,
}

impl Format {
    /// Extension appended to the resource name.
    pub fn suffix(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Xml => "xml",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_rates_path_has_no_separator() {
        assert_eq!(Resource::CurrencyRates.as_str(), "currencyrates");
        assert_eq!(Resource::CurrencyRates.to_string(), "currencyrates");
    }

    #[test]
    fn format_suffixes() {
        assert_eq!(Format::Json.suffix(), "json");
        assert_eq!(Format::Xml.to_string(), "xml");
    }
}
