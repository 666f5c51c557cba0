use civetta_common::exif::lookup_tag_name;
use civetta_common::math::SafeAdd;

use super::*;
use crate::error::{Error, Result};

/// All directories of a file with their decoded entries
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata<'a> {
    /// The IFD chain, starting with IFD0
    pub chain: Vec<DirectoryNode<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryNode<'a> {
    pub ifd: Ifd,
    pub offset: u32,
    pub fields: Vec<DecodedEntry<'a>>,
    pub skipped: Vec<SkippedEntry>,
    /// Directories referenced by pointer tags in this directory
    pub children: Vec<DirectoryNode<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedEntry<'a> {
    pub entry: Entry,
    /// Name for diagnostics, `None` for unknown tags
    pub name: Option<&'static str>,
    pub value: Value<'a>,
}

/// Entry that was not decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedEntry {
    pub tag: Tag,
    pub entry: Entry,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Type code outside of the known types
    UnknownType(u16),
    /// Directory pointer that is not a single `SHORT` or `LONG`
    InvalidPointer,
}

impl<'a> Metadata<'a> {
    /// All directories, depth first
    pub fn directories(&self) -> Vec<&DirectoryNode<'a>> {
        let mut out = Vec::new();
        for node in &self.chain {
            node.collect(&mut out);
        }
        out
    }

    pub fn directory(&self, ifd: Ifd) -> Option<&DirectoryNode<'a>> {
        self.directories().into_iter().find(|node| node.ifd == ifd)
    }

    /// First decoded entry for a tag
    pub fn field(&self, tagifd: impl Into<TagIfd>) -> Option<&DecodedEntry<'a>> {
        let tagifd = tagifd.into();
        self.directory(tagifd.ifd)?
            .fields
            .iter()
            .find(|field| field.entry.tag == tagifd.tag)
    }
}

impl<'a> DirectoryNode<'a> {
    fn new(ifd: Ifd, offset: u32) -> Self {
        Self {
            ifd,
            offset,
            fields: Vec::new(),
            skipped: Vec::new(),
            children: Vec::new(),
        }
    }

    fn collect<'n>(&'n self, out: &mut Vec<&'n DirectoryNode<'a>>) {
        out.push(self);
        for child in &self.children {
            child.collect(out);
        }
    }
}

impl super::Session {
    /// Decode all directories and their entries
    ///
    /// Follows the IFD chain and the Exif, GPS and interoperability pointers.
    /// Entries with unknown types or broken pointers are reported as skipped.
    /// Out of bounds data and directory cycles abort decoding.
    pub fn metadata(&self) -> Result<Metadata<'_>> {
        let mut traversal = Traversal::new();
        let mut chain = Vec::new();
        let mut offset = self.ifd0_offset;
        let mut index: u16 = 0;

        loop {
            let (node, next_offset) = self.directory_node(Ifd::chained(index), offset, &mut traversal)?;
            chain.push(node);

            if next_offset == 0 {
                break;
            }

            offset = next_offset;
            index = index.safe_add(1)?;
        }

        Ok(Metadata { chain })
    }

    fn directory_node(
        &self,
        ifd: Ifd,
        offset: u32,
        traversal: &mut Traversal,
    ) -> Result<(DirectoryNode<'_>, u32)> {
        traversal.visit(offset)?;
        let directory = self.read_directory(offset)?;
        tracing::debug!("Decoding {ifd:?} at {offset}");

        let mut node = DirectoryNode::new(ifd, offset);

        for entry in directory.entries() {
            let skip = |reason| SkippedEntry {
                tag: entry.tag,
                entry: *entry,
                reason,
            };

            let value = match self.decode_value(entry) {
                Ok(value) => value,
                Err(Error::UnknownType(code)) => {
                    tracing::info!("Skipping {} in {ifd:?} with unknown type {code}", entry.tag);
                    node.skipped.push(skip(SkipReason::UnknownType(code)));
                    continue;
                }
                Err(err) => return Err(err),
            };

            if let Some(sub_ifd) = entry.tag.exif_specific_ifd() {
                let Some(sub_offset) = value.as_u32() else {
                    tracing::info!("Invalid {sub_ifd:?} pointer in {ifd:?}");
                    node.skipped.push(skip(SkipReason::InvalidPointer));
                    continue;
                };

                let (child, _) = self.directory_node(sub_ifd, sub_offset, traversal)?;
                node.children.push(child);
            }

            node.fields.push(DecodedEntry {
                entry: *entry,
                name: lookup_tag_name(TagIfd::new(entry.tag, ifd)),
                value,
            });
        }

        Ok((node, directory.next_offset()))
    }
}
