//! Named store of solids, materials and logical volumes.

use serde::Serialize;

use crate::error::RegistryError;
use crate::materials::Material;
use crate::solid::{LogicalVolume, Solid};

/// Geometry registry. Entries keep their insertion order; solid and logical
/// volume names must be unique, while a material registered twice under the
/// same name is shared as long as both definitions agree.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Registry {
    solids: Vec<Solid>,
    materials: Vec<Material>,
    logical_volumes: Vec<LogicalVolume>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn solid(&self, name: &str) -> Option<&Solid> {
        self.solids.iter().find(|s| s.name() == name)
    }

    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.name == name)
    }

    pub fn logical_volume(&self, name: &str) -> Option<&LogicalVolume> {
        self.logical_volumes.iter().find(|lv| lv.name == name)
    }

    pub fn solids(&self) -> &[Solid] {
        &self.solids
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn logical_volumes(&self) -> &[LogicalVolume] {
        &self.logical_volumes
    }

    /// Fails if any of `solids` or `volume` would clash with an existing
    /// entry, or if a different material is registered under the name of
    /// `material`. Lets a caller check a whole batch before inserting anything.
    pub fn check_free(
        &self,
        solids: &[&str],
        volume: &str,
        material: &Material,
    ) -> Result<(), RegistryError> {
        if let Some(name) = solids.iter().find(|name| self.solid(name).is_some()) {
            return Err(RegistryError::DuplicateSolid(name.to_string()));
        }
        if self.logical_volume(volume).is_some() {
            return Err(RegistryError::DuplicateLogicalVolume(volume.to_string()));
        }
        self.check_material(material)
    }

    fn check_material(&self, material: &Material) -> Result<(), RegistryError> {
        match self.material(&material.name) {
            Some(existing) if existing != material => {
                Err(RegistryError::ConflictingMaterial(material.name.clone()))
            }
            _ => Ok(()),
        }
    }

    pub fn add_solid(&mut self, solid: Solid) -> Result<(), RegistryError> {
        if self.solid(solid.name()).is_some() {
            return Err(RegistryError::DuplicateSolid(solid.name().to_string()));
        }
        self.solids.push(solid);
        Ok(())
    }

    /// Registers `material` unless an identical one exists. Returns the
    /// registered name.
    pub fn add_material(&mut self, material: Material) -> Result<String, RegistryError> {
        self.check_material(&material)?;
        let name = material.name.clone();
        if self.material(&name).is_none() {
            self.materials.push(material);
        }
        Ok(name)
    }

    pub fn add_logical_volume(&mut self, volume: LogicalVolume) -> Result<(), RegistryError> {
        if self.logical_volume(&volume.name).is_some() {
            return Err(RegistryError::DuplicateLogicalVolume(volume.name));
        }
        if self.solid(&volume.solid).is_none() {
            return Err(RegistryError::DanglingReference {
                volume: volume.name,
                kind: "solid",
                target: volume.solid,
            });
        }
        if self.material(&volume.material).is_none() {
            return Err(RegistryError::DanglingReference {
                volume: volume.name,
                kind: "material",
                target: volume.material,
            });
        }
        self.logical_volumes.push(volume);
        Ok(())
    }
}
