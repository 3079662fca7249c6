//! Typed attribute accessors.
//!
//! Getters return `None` when the node type does not carry the attribute.
//! Setters validate the node type and the value, and leave the node untouched
//! when they return an error.

use crate::{
    AttributeError, Arena, ListDelimiter, ListType, NodeData, NodeId, NodeType, SourcePosition,
};

/// Largest start number an ordered list marker can hold.
pub const MAX_LIST_START: i64 = 999_999_999;

impl Arena {
    #[inline]
    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.get(id).data
    }

    /// Mutable access to the attribute data.
    ///
    /// The variant must keep matching the node type; prefer the typed setters
    /// below, which also validate values.
    #[inline]
    pub fn data_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.get_mut(id).data
    }

    #[inline]
    pub fn position(&self, id: NodeId) -> SourcePosition {
        self.get(id).position
    }

    /// Literal content of `text`, `code`, `code_block`, `html` and
    /// `html_inline` nodes.
    #[inline]
    pub fn literal(&self, id: NodeId) -> Option<&str> {
        self.get(id).literal()
    }

    pub fn set_literal(&mut self, id: NodeId, literal: impl Into<String>) -> Result<(), AttributeError> {
        let node = self.get_mut(id);
        if !node.node_type.has_literal() {
            return Err(AttributeError::wrong_type(
                "literal",
                "text, code, code_block, html or html_inline",
                node.node_type,
            ));
        }
        node.literal = Some(literal.into());
        Ok(())
    }

    pub fn header_level(&self, id: NodeId) -> Option<u8> {
        match self.data(id) {
            NodeData::Header(header) => Some(header.level),
            _ => None,
        }
    }

    pub fn set_header_level(&mut self, id: NodeId, level: u8) -> Result<(), AttributeError> {
        let found = self.node_type(id);
        let NodeData::Header(header) = &mut self.get_mut(id).data else {
            return Err(AttributeError::wrong_type("header_level", "header", found));
        };
        if !(1..=6).contains(&level) {
            return Err(AttributeError::out_of_range("header_level", level.into(), 1, 6));
        }
        header.level = level;
        Ok(())
    }

    pub fn list_type(&self, id: NodeId) -> Option<ListType> {
        match self.data(id) {
            NodeData::List(list) => Some(list.list_type),
            _ => None,
        }
    }

    pub fn set_list_type(&mut self, id: NodeId, list_type: ListType) -> Result<(), AttributeError> {
        let found = self.node_type(id);
        match &mut self.get_mut(id).data {
            NodeData::List(list) => {
                list.list_type = list_type;
                Ok(())
            }
            _ => Err(AttributeError::wrong_type("list_type", "list", found)),
        }
    }

    pub fn list_start(&self, id: NodeId) -> Option<u32> {
        match self.data(id) {
            NodeData::List(list) => Some(list.start),
            _ => None,
        }
    }

    /// Sets the start number of a list. Values outside `0..=999_999_999` are
    /// rejected.
    pub fn set_list_start(&mut self, id: NodeId, start: i64) -> Result<(), AttributeError> {
        let found = self.node_type(id);
        let NodeData::List(list) = &mut self.get_mut(id).data else {
            return Err(AttributeError::wrong_type("list_start", "list", found));
        };
        let Ok(value) = u32::try_from(start) else {
            return Err(AttributeError::out_of_range("list_start", start, 0, MAX_LIST_START));
        };
        if start > MAX_LIST_START {
            return Err(AttributeError::out_of_range("list_start", start, 0, MAX_LIST_START));
        }
        list.start = value;
        Ok(())
    }

    pub fn list_tight(&self, id: NodeId) -> Option<bool> {
        match self.data(id) {
            NodeData::List(list) => Some(list.tight),
            _ => None,
        }
    }

    pub fn set_list_tight(&mut self, id: NodeId, tight: bool) -> Result<(), AttributeError> {
        let found = self.node_type(id);
        match &mut self.get_mut(id).data {
            NodeData::List(list) => {
                list.tight = tight;
                Ok(())
            }
            _ => Err(AttributeError::wrong_type("list_tight", "list", found)),
        }
    }

    pub fn list_delimiter(&self, id: NodeId) -> Option<ListDelimiter> {
        match self.data(id) {
            NodeData::List(list) => Some(list.delimiter),
            _ => None,
        }
    }

    pub fn set_list_delimiter(
        &mut self,
        id: NodeId,
        delimiter: ListDelimiter,
    ) -> Result<(), AttributeError> {
        let found = self.node_type(id);
        match &mut self.get_mut(id).data {
            NodeData::List(list) => {
                list.delimiter = delimiter;
                Ok(())
            }
            _ => Err(AttributeError::wrong_type("list_delimiter", "list", found)),
        }
    }

    /// Task state of a list item, when it is a task.
    pub fn item_checked(&self, id: NodeId) -> Option<bool> {
        match self.data(id) {
            NodeData::Item(item) => item.checked,
            _ => None,
        }
    }

    pub fn set_item_checked(&mut self, id: NodeId, checked: Option<bool>) -> Result<(), AttributeError> {
        let found = self.node_type(id);
        match &mut self.get_mut(id).data {
            NodeData::Item(item) => {
                item.checked = checked;
                Ok(())
            }
            _ => Err(AttributeError::wrong_type("item_checked", "item", found)),
        }
    }

    pub fn fence_info(&self, id: NodeId) -> Option<&str> {
        match self.data(id) {
            NodeData::CodeBlock(code) => Some(&code.info),
            _ => None,
        }
    }

    pub fn set_fence_info(&mut self, id: NodeId, info: impl Into<String>) -> Result<(), AttributeError> {
        let found = self.node_type(id);
        match &mut self.get_mut(id).data {
            NodeData::CodeBlock(code) => {
                code.info = info.into();
                Ok(())
            }
            _ => Err(AttributeError::wrong_type("fence_info", "code_block", found)),
        }
    }

    pub fn url(&self, id: NodeId) -> Option<&str> {
        match self.data(id) {
            NodeData::Link(link) => Some(&link.url),
            _ => None,
        }
    }

    pub fn set_url(&mut self, id: NodeId, url: impl Into<String>) -> Result<(), AttributeError> {
        let found = self.node_type(id);
        match &mut self.get_mut(id).data {
            NodeData::Link(link) => {
                link.url = url.into();
                Ok(())
            }
            _ => Err(AttributeError::wrong_type("url", "link or image", found)),
        }
    }

    pub fn title(&self, id: NodeId) -> Option<&str> {
        match self.data(id) {
            NodeData::Link(link) => Some(&link.title),
            _ => None,
        }
    }

    pub fn set_title(&mut self, id: NodeId, title: impl Into<String>) -> Result<(), AttributeError> {
        let found = self.node_type(id);
        match &mut self.get_mut(id).data {
            NodeData::Link(link) => {
                link.title = title.into();
                Ok(())
            }
            _ => Err(AttributeError::wrong_type("title", "link or image", found)),
        }
    }

    pub fn on_enter(&self, id: NodeId) -> Option<&str> {
        match self.data(id) {
            NodeData::Custom(custom) => Some(&custom.on_enter),
            _ => None,
        }
    }

    pub fn set_on_enter(&mut self, id: NodeId, markup: impl Into<String>) -> Result<(), AttributeError> {
        let found = self.node_type(id);
        match &mut self.get_mut(id).data {
            NodeData::Custom(custom) => {
                custom.on_enter = markup.into();
                Ok(())
            }
            _ => Err(AttributeError::wrong_type(
                "on_enter",
                "custom_block or custom_inline",
                found,
            )),
        }
    }

    pub fn on_exit(&self, id: NodeId) -> Option<&str> {
        match self.data(id) {
            NodeData::Custom(custom) => Some(&custom.on_exit),
            _ => None,
        }
    }

    pub fn set_on_exit(&mut self, id: NodeId, markup: impl Into<String>) -> Result<(), AttributeError> {
        let found = self.node_type(id);
        match &mut self.get_mut(id).data {
            NodeData::Custom(custom) => {
                custom.on_exit = markup.into();
                Ok(())
            }
            _ => Err(AttributeError::wrong_type(
                "on_exit",
                "custom_block or custom_inline",
                found,
            )),
        }
    }

    /// Returns true if the node is a header.
    #[inline]
    pub fn is_header(&self, id: NodeId) -> bool {
        self.node_type(id) == NodeType::Header
    }
}
