use anyhow::{Result, Context};
use std::collections::BTreeSet;
use std::path::Path;

/// Residue (`RESI`) and patch (`PRES`) names declared in a CHARMM-style topology file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopologyNames {
    pub residues: BTreeSet<String>,
    pub patches: BTreeSet<String>,
}

impl TopologyNames {
    pub fn has_residue(&self, name: &str) -> bool { self.residues.contains(&name.to_ascii_uppercase()) }
    pub fn has_patch(&self, name: &str) -> bool { self.patches.contains(&name.to_ascii_uppercase()) }
}

pub fn parse_topology(content: &str) -> TopologyNames {
    let mut names = TopologyNames::default();
    for line in content.lines() {
        // '!' starts a comment
        let line = line.split('!').next().unwrap_or("");
        let mut parts = line.split_whitespace();
        let (Some(keyword), Some(name)) = (parts.next(), parts.next()) else { continue };
        match keyword.to_ascii_uppercase().as_str() {
            "RESI" | "RESIDUE" => { names.residues.insert(name.to_ascii_uppercase()); }
            "PRES" | "PATCH" => { names.patches.insert(name.to_ascii_uppercase()); }
            _ => {}
        }
    }
    names
}

pub fn read_topology<P: AsRef<Path>>(path: P) -> Result<TopologyNames> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read topology file: {:?}", path.as_ref()))?;
    Ok(parse_topology(&content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_residues_and_patches() {
        let top = "\
* lignin topology
36  1
MASS 1 HGA1 1.008 H
RESI GUAI  0.00 ! guaiacyl
GROUP
ATOM C1 CG2R61 -0.115
resi syri 0.00
PRES BO4R 0.00 ! beta-O-4
PRES 55   0.00
! PRES COMMENTED 0.00
END
";
        let names = parse_topology(top);
        assert!(names.has_residue("GUAI"));
        assert!(names.has_residue("SYRI"));
        assert!(!names.has_residue("PHYD"));
        assert!(names.has_patch("bo4r"));
        assert!(names.has_patch("55"));
        assert!(!names.has_patch("COMMENTED"));
        assert_eq!(names.residues.len(), 2);
    }
}
