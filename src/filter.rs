//! Selection of the fields reported to the handler.

use std::collections::HashSet;

/// Field filter.
///
/// An empty filter accepts every field. Once a field has been added with [`Filter::set`], only
/// the added fields are accepted. Fields that are not accepted are still decoded so the walker
/// can step over them, they are just not reported.
///
/// The protocol version and observation domain are descriptive metadata. The walker rejects a
/// filter that names a version other than IPFIX but does not restrict decoding to the domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter
{
    version: u16,
    domain_id: u32,
    fields: HashSet<(u32, u16)>,
}

impl Filter
{
    /// Creates an accept-all filter.
    pub fn new() -> Self
    {
        Default::default()
    }

    /// Sets the protocol version the filter was written for.
    pub fn set_version(&mut self, version: u16)
    {
        self.version = version;
    }

    /// Protocol version the filter was written for; 0 when unset.
    pub fn version(&self) -> u16
    {
        self.version
    }

    /// Sets the observation domain the filter was written for.
    pub fn set_domain_id(&mut self, domain_id: u32)
    {
        self.domain_id = domain_id;
    }

    /// Observation domain the filter was written for.
    pub fn domain_id(&self) -> u32
    {
        self.domain_id
    }

    /// Adds a field to the accepted set. Adding a field twice has no effect.
    pub fn set(&mut self, enterprise_id: u32, field_id: u16)
    {
        self.fields.insert((enterprise_id, field_id));
    }

    /// True, if the field should be reported.
    #[inline]
    pub fn accepts(&self, enterprise_id: u32, field_id: u16) -> bool
    {
        self.fields.is_empty() || self.fields.contains(&(enterprise_id, field_id))
    }

    /// True, if no field has been added and every field is accepted.
    pub fn is_accept_all(&self) -> bool
    {
        self.fields.is_empty()
    }

    /// Number of fields added.
    pub fn len(&self) -> usize
    {
        self.fields.len()
    }

    /// True, if no field has been added.
    pub fn is_empty(&self) -> bool
    {
        self.fields.is_empty()
    }
}

impl Extend<(u32, u16)> for Filter
{
    fn extend<T: IntoIterator<Item = (u32, u16)>>(&mut self, iter: T)
    {
        self.fields.extend(iter)
    }
}

impl FromIterator<(u32, u16)> for Filter
{
    fn from_iter<T: IntoIterator<Item = (u32, u16)>>(iter: T) -> Self
    {
        let mut filter = Filter::new();
        filter.extend(iter);
        filter
    }
}
