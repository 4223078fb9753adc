use serde::{Deserialize, Serialize};

/// Priority given to a mail exchanger when none is specified
pub const DEFAULT_MX_PRIORITY: u16 = 1;

fn default_priority() -> u16 {
    DEFAULT_MX_PRIORITY
}

/// A mail exchanger for a host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MailExchanger {
    /// Host to deliver mail to. Absolute names must end in "." (e.g. "thedreaming.org.")
    mail_host: String,
    /// Lower values are preferred
    #[serde(default = "default_priority")]
    priority: u16,
}

impl MailExchanger {
    pub fn new(mail_host: impl Into<String>, priority: u16) -> Self {
        Self {
            mail_host: mail_host.into(),
            priority,
        }
    }

    /// Mail exchanger with the default priority of 1
    pub fn with_default_priority(mail_host: impl Into<String>) -> Self {
        Self::new(mail_host, DEFAULT_MX_PRIORITY)
    }

    pub fn mail_host(&self) -> &str {
        &self.mail_host
    }

    pub fn priority(&self) -> u16 {
        self.priority
    }
}

/// A domain name and the addresses, aliases and mail exchangers associated with it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Host {
    /// Relative ("mystic") or absolute ("renegade.thedreaming.org.") host name
    pub name: String,
    /// IPv4 addresses, written as A records and IPv4 PTR records
    #[serde(default)]
    pub addresses: Vec<String>,
    /// Names written as CNAME records pointing at this host
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Written as MX records in the order given
    #[serde(default)]
    pub mail_exchangers: Vec<MailExchanger>,
    /// IPv6 addresses, written as AAAA records and IPv6 PTR records
    #[serde(default)]
    pub ipv6_addresses: Vec<String>,
}

impl Host {
    /// Create a host with no records
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.add_address(address);
        self
    }

    pub fn with_ipv6_address(mut self, address: impl Into<String>) -> Self {
        self.add_ipv6_address(address);
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.add_alias(alias);
        self
    }

    pub fn with_mail_exchanger(mut self, mail_exchanger: MailExchanger) -> Self {
        self.add_mail_exchanger(mail_exchanger);
        self
    }

    pub fn add_address(&mut self, address: impl Into<String>) {
        self.addresses.push(address.into());
    }

    pub fn add_ipv6_address(&mut self, address: impl Into<String>) {
        self.ipv6_addresses.push(address.into());
    }

    pub fn add_alias(&mut self, alias: impl Into<String>) {
        self.aliases.push(alias.into());
    }

    pub fn add_mail_exchanger(&mut self, mail_exchanger: MailExchanger) {
        self.mail_exchangers.push(mail_exchanger);
    }

    /// Number of forward records this host produces
    pub fn record_count(&self) -> usize {
        self.addresses.len()
            + self.ipv6_addresses.len()
            + self.mail_exchangers.len()
            + self.aliases.len()
    }
}
