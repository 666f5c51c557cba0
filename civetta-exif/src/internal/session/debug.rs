use super::metadata::DirectoryNode;
use crate::error::Result;

impl super::Session {
    /// Human readable listing of all directories and entries
    pub fn debug_dump(&self) -> Result<String> {
        let metadata = self.metadata()?;

        let mut out = format!("Byte order: {:?}\n", self.byte_order());
        for node in &metadata.chain {
            dump_node(&mut out, node, 0);
        }

        Ok(out)
    }
}

fn dump_node(out: &mut String, node: &DirectoryNode, depth: usize) {
    let indent = "  ".repeat(depth);

    out.push_str(&format!("\n{indent}{:?} at {}\n", node.ifd, node.offset));
    out.push_str(&format!("{indent}------------------------------\n"));

    for field in &node.fields {
        let entry = field.entry;
        let name = field.name.unwrap_or("Unknown");
        out.push_str(&format!(
            "{indent}{} {name} {:?}({}): {}\n",
            entry.tag, entry.data_type, entry.count, field.value
        ));
    }

    for skipped in &node.skipped {
        out.push_str(&format!(
            "{indent}{} skipped: {:?}\n",
            skipped.tag, skipped.reason
        ));
    }

    for child in &node.children {
        dump_node(out, child, depth.saturating_add(1));
    }
}
