//! Cross-domain reference validation.
//!
//! Employees, products, projects, parcels, and warehouses live in their own
//! bounded contexts. This module only asks those contexts two questions,
//! through the [`DomainDirectory`] seam, and refuses records that embed a
//! dangling or inactive foreign id.

use std::collections::HashMap;
use std::fmt;

use uuid::Uuid;

use crate::errors::{LedgerError, Result};

/// Foreign domains a ledger record may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceDomain {
    Employee,
    Product,
    Project,
    Parcel,
    Warehouse,
}

impl fmt::Display for ReferenceDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReferenceDomain::Employee => "employee",
            ReferenceDomain::Product => "product",
            ReferenceDomain::Project => "project",
            ReferenceDomain::Parcel => "parcel",
            ReferenceDomain::Warehouse => "warehouse",
        };
        f.write_str(name)
    }
}

/// Capability group every owning module exposes for its entities.
pub trait DomainDirectory: Send + Sync {
    fn exists(&self, id: Uuid) -> bool;
    fn is_active(&self, id: Uuid) -> bool;
}

/// Consults the owning module of each foreign domain before a record that
/// embeds one of its ids is accepted. A missing or inactive id fails with a
/// [`LedgerError::Reference`] naming the domain; references are never
/// silently nulled.
#[derive(Default)]
pub struct ReferenceValidator {
    directories: HashMap<ReferenceDomain, Box<dyn DomainDirectory>>,
}

impl ReferenceValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_directory(
        mut self,
        domain: ReferenceDomain,
        directory: Box<dyn DomainDirectory>,
    ) -> Self {
        self.directories.insert(domain, directory);
        self
    }

    /// Fails unless the id exists in its owning domain.
    pub fn ensure_exists(&self, domain: ReferenceDomain, id: Uuid) -> Result<()> {
        let directory = self.directory(domain)?;
        if directory.exists(id) {
            Ok(())
        } else {
            Err(LedgerError::Reference {
                domain: domain.to_string(),
                id: id.to_string(),
            })
        }
    }

    /// Fails unless the id exists and is active in its owning domain.
    pub fn ensure_active(&self, domain: ReferenceDomain, id: Uuid) -> Result<()> {
        let directory = self.directory(domain)?;
        if directory.exists(id) && directory.is_active(id) {
            Ok(())
        } else {
            Err(LedgerError::Reference {
                domain: domain.to_string(),
                id: id.to_string(),
            })
        }
    }

    fn directory(&self, domain: ReferenceDomain) -> Result<&dyn DomainDirectory> {
        match self.directories.get(&domain) {
            Some(directory) => Ok(&**directory),
            None => Err(LedgerError::Validation(format!(
                "no directory registered for domain `{}`",
                domain
            ))),
        }
    }
}

/// Directory backed by a plain map. Used by embedding contexts that already
/// hold their entities in memory, and by tests.
#[derive(Default)]
pub struct InMemoryDirectory {
    entries: HashMap<Uuid, bool>,
}

impl InMemoryDirectory {
    pub fn insert(&mut self, id: Uuid, active: bool) {
        self.entries.insert(id, active);
    }
}

impl DomainDirectory for InMemoryDirectory {
    fn exists(&self, id: Uuid) -> bool {
        self.entries.contains_key(&id)
    }

    fn is_active(&self, id: Uuid) -> bool {
        self.entries.get(&id).copied().unwrap_or(false)
    }
}
