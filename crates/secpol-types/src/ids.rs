//! Stable identifiers for policies and rules.
//!
//! A rule carries two identifiers: the STIG finding id (`SLES-15-040200`) used in
//! reports, and the SCAP rule name (`partition_for_home`) used by disabled-rule lists.

/// Environment variable listing the policies to enable at startup.
pub const ENV_SECURITY_POLICIES: &str = "SECPOL_SECURITY_POLICIES";

// Policies
pub const POLICY_DISA_STIG: &str = "disa_stig";

// Rules: network
pub const RULE_NO_WIRELESS: &str = "SLES-15-010380";
pub const NAME_NO_WIRELESS: &str = "wireless_disable_interfaces";

// Rules: storage
pub const RULE_PARTITION_HOME: &str = "SLES-15-040200";
pub const NAME_PARTITION_HOME: &str = "partition_for_home";
pub const RULE_PARTITION_VAR: &str = "SLES-15-040210";
pub const NAME_PARTITION_VAR: &str = "partition_for_var";
pub const RULE_PARTITION_VAR_LOG_AUDIT: &str = "SLES-15-030810";
pub const NAME_PARTITION_VAR_LOG_AUDIT: &str = "partition_for_var_log_audit";
pub const RULE_ENCRYPT_PARTITIONS: &str = "SLES-15-010330";
pub const NAME_ENCRYPT_PARTITIONS: &str = "encrypt_partitions";

// Rules: firewall
pub const RULE_FIREWALL_ENABLED: &str = "SLES-15-010220";
pub const NAME_FIREWALL_ENABLED: &str = "service_firewalld_enabled";

// Rules: bootloader
pub const RULE_BOOTLOADER_PASSWORD: &str = "SLES-15-010190";
pub const NAME_BOOTLOADER_PASSWORD: &str = "grub2_password";
