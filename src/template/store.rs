use super::*;
use lru::LruCache;
use std::num::NonZeroUsize;
use tracing::debug;

/// Bounded template store.
///
/// Holds templates keyed by observation domain and template ID. When inserting a new template
/// would exceed the capacity, the least recently used template is evicted.
pub struct TemplateStore
{
    cache: LruCache<TemplateKey, Template>,
}

impl TemplateStore
{
    /// Creates an empty store holding at most `capacity` templates.
    pub fn new(capacity: NonZeroUsize) -> Self
    {
        TemplateStore {
            cache: LruCache::new(capacity),
        }
    }

    /// Maximum number of resident templates.
    pub fn capacity(&self) -> usize
    {
        self.cache.cap().get()
    }

    /// Number of resident templates.
    pub fn len(&self) -> usize
    {
        self.cache.len()
    }

    /// True, if no templates are resident.
    pub fn is_empty(&self) -> bool
    {
        self.cache.is_empty()
    }

    /// Inserts or replaces a template of the domain.
    ///
    /// Returns the template previously defined under the same ID, if any.
    pub fn insert(&mut self, domain_id: u32, template: Template) -> Option<Template>
    {
        let key = TemplateKey::new(domain_id, template.id);
        match self.cache.push(key, template) {
            Some((old_key, old)) if old_key == key => Some(old),
            Some((evicted, _)) => {
                debug!(
                    message = "Evicted template.",
                    domain_id = evicted.domain_id,
                    template_id = evicted.template_id
                );
                None
            }
            None => None,
        }
    }

    /// Looks up a template, marking it as most recently used.
    pub fn get(&mut self, domain_id: u32, template_id: u16) -> Option<&Template>
    {
        self.cache.get(&TemplateKey::new(domain_id, template_id))
    }

    /// Looks up a template without touching its recency.
    pub fn peek(&self, domain_id: u32, template_id: u16) -> Option<&Template>
    {
        self.cache.peek(&TemplateKey::new(domain_id, template_id))
    }

    /// True, if the template is resident.
    pub fn contains(&self, domain_id: u32, template_id: u16) -> bool
    {
        self.cache
            .contains(&TemplateKey::new(domain_id, template_id))
    }

    /// Removes a template.
    pub fn remove(&mut self, domain_id: u32, template_id: u16) -> Option<Template>
    {
        self.cache.pop(&TemplateKey::new(domain_id, template_id))
    }

    /// Removes every template of the domain, returning how many were removed.
    pub fn remove_domain(&mut self, domain_id: u32) -> usize
    {
        let keys: Vec<_> = self
            .cache
            .iter()
            .map(|(key, _)| *key)
            .filter(|key| key.domain_id == domain_id)
            .collect();
        for key in &keys {
            self.cache.pop(key);
        }
        keys.len()
    }

    /// Removes every template.
    pub fn clear(&mut self)
    {
        self.cache.clear()
    }

    /// Iterates resident templates from the most to the least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&TemplateKey, &Template)>
    {
        self.cache.iter()
    }
}

impl std::fmt::Debug for TemplateStore
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        f.debug_map().entries(self.cache.iter()).finish()
    }
}

#[cfg(test)]
mod test
{
    use super::*;

    fn store(capacity: usize) -> TemplateStore
    {
        TemplateStore::new(NonZeroUsize::new(capacity).unwrap())
    }

    fn template(id: u16, field_id: u16) -> Template
    {
        Template::new(id, vec![FieldSpecifier::new(field_id, 4)])
    }

    #[test]
    fn last_writer_wins()
    {
        let mut templates = store(4);
        assert_eq!(templates.insert(0, template(256, 8)), None);
        assert_eq!(templates.insert(0, template(256, 12)), Some(template(256, 8)));

        assert_eq!(templates.len(), 1);
        assert_eq!(templates.get(0, 256), Some(&template(256, 12)));
    }

    #[test]
    fn domains_are_separate()
    {
        let mut templates = store(4);
        templates.insert(1, template(256, 8));
        templates.insert(2, template(256, 12));

        assert_eq!(templates.get(1, 256), Some(&template(256, 8)));
        assert_eq!(templates.get(2, 256), Some(&template(256, 12)));
        assert_eq!(templates.get(3, 256), None);
    }

    #[test]
    fn least_recently_used_is_evicted()
    {
        let mut templates = store(2);
        templates.insert(0, template(256, 8));
        templates.insert(0, template(257, 8));

        // Touch 256 so that 257 becomes the eviction candidate.
        assert!(templates.get(0, 256).is_some());
        let order: Vec<_> = templates.iter().map(|(key, _)| key.template_id).collect();
        assert_eq!(order, vec![256, 257]);
        templates.insert(0, template(258, 8));

        assert_eq!(templates.len(), 2);
        assert!(templates.contains(0, 256));
        assert!(!templates.contains(0, 257));
        assert!(templates.contains(0, 258));
    }

    #[test]
    fn peek_does_not_refresh()
    {
        let mut templates = store(2);
        templates.insert(0, template(256, 8));
        templates.insert(0, template(257, 8));

        assert!(templates.peek(0, 256).is_some());
        templates.insert(0, template(258, 8));

        assert!(!templates.contains(0, 256));
    }

    #[test]
    fn remove_domain()
    {
        let mut templates = store(8);
        templates.insert(1, template(256, 8));
        templates.insert(1, template(257, 8));
        templates.insert(2, template(256, 8));

        assert_eq!(templates.remove_domain(1), 2);
        assert_eq!(templates.len(), 1);
        assert!(templates.contains(2, 256));
        assert_eq!(templates.remove(2, 256), Some(template(256, 8)));
        assert!(templates.is_empty());
    }
}
