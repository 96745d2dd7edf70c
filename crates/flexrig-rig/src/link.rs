//! Skin binding: parenting a mesh object to a built armature.

use log::debug;

use crate::error::{RigError, RigResult};

/// Scene host able to bind a mesh to an armature with automatic weights.
pub trait SkinHost {
    /// True if the scene has an object with this name.
    fn has_object(&self, name: &str) -> bool;

    /// Makes `armature` the deform parent of `target`.
    fn parent_with_automatic_weights(&mut self, armature: &str, target: &str);
}

/// Binds `target_name` to the armature object `armature_name`.
///
/// Both objects must exist; otherwise nothing is changed.
pub fn link_to_object<H: SkinHost + ?Sized>(
    host: &mut H,
    armature_name: &str,
    target_name: &str,
) -> RigResult<()> {
    for name in [armature_name, target_name] {
        if !host.has_object(name) {
            return Err(RigError::UnknownObject {
                name: name.to_string(),
            });
        }
    }

    debug!("link '{}' to armature '{}'", target_name, armature_name);
    host.parent_with_automatic_weights(armature_name, target_name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Default)]
    struct Scene {
        objects: HashSet<String>,
        links: Vec<(String, String)>,
    }

    impl SkinHost for Scene {
        fn has_object(&self, name: &str) -> bool {
            self.objects.contains(name)
        }

        fn parent_with_automatic_weights(&mut self, armature: &str, target: &str) {
            self.links.push((armature.to_string(), target.to_string()));
        }
    }

    fn scene() -> Scene {
        Scene {
            objects: ["Rig", "Body"].iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_link() {
        let mut scene = scene();
        link_to_object(&mut scene, "Rig", "Body").unwrap();
        assert_eq!(scene.links, vec![("Rig".to_string(), "Body".to_string())]);
    }

    #[test]
    fn test_missing_object_is_noop() {
        let mut scene = scene();
        let err = link_to_object(&mut scene, "Rig", "Cube").unwrap_err();
        assert!(matches!(err, RigError::UnknownObject { ref name } if name == "Cube"));
        assert!(link_to_object(&mut scene, "Other", "Body").is_err());
        assert!(scene.links.is_empty());
    }
}
