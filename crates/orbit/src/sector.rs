use crate::card::{Card, CardHover};
use crate::hover::{HoverEvent, HoverTarget};
use crate::layout::{Category, Layout, SectorSpec};
use crate::resource::Assets;
use glam::{Mat4, Vec3};

pub const LABEL_FONT_SIZE: f32 = 0.25;

/// One category's wedge of the ring: its cards and its label.
#[derive(Debug, Clone)]
pub struct Sector {
    spec: SectorSpec,
    cards: Vec<Card>,
    label_anchor: Vec3,
    hovered: Option<usize>,
}

impl Sector {
    pub fn new(spec: SectorSpec, density: f32) -> Self {
        let layout = Layout::generate(&spec, density);
        Self {
            cards: layout.slots.iter().map(Card::new).collect(),
            label_anchor: layout.label_anchor,
            spec,
            hovered: None,
        }
    }

    pub fn category(&self) -> Category {
        self.spec.category
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn label(&self) -> String {
        self.spec.category.to_string()
    }

    pub fn label_anchor(&self) -> Vec3 {
        self.label_anchor
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.spec.ring_offset)
    }

    /// Forwards a card's hover transition upward, tagged with this sector.
    pub fn report_hover(&self, hover: CardHover) -> HoverEvent {
        HoverEvent {
            category: self.spec.category,
            hover,
        }
    }

    /// Re-derives every card's flags from the ring-wide hover.
    pub fn sync_hover(&mut self, current: Option<HoverTarget>) {
        self.hovered = current
            .filter(|t| t.category == self.spec.category && t.index < self.cards.len())
            .map(|t| t.index);

        match self.hovered {
            Some(index) => self.cards.iter_mut().for_each(|c| c.on_hover_enter(index)),
            None => self.cards.iter_mut().for_each(Card::on_hover_exit),
        }
    }

    pub fn request_resources(&self, assets: &mut Assets) {
        for card in &self.cards {
            assets.request(card.resource());
        }
    }

    pub fn tick(&mut self, dt: f32, assets: &Assets) {
        for card in &mut self.cards {
            card.tick(dt, assets);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardState;
    use crate::layout::DENSITY;

    fn summer() -> Sector {
        Sector::new(SectorSpec::ring()[1].clone(), DENSITY)
    }

    #[test]
    fn test_builds_cards_from_layout() {
        let sector = summer();
        assert_eq!(sector.cards().len(), 32);
        assert_eq!(sector.label(), "summer");
        assert!(
            sector
                .cards()
                .iter()
                .enumerate()
                .all(|(i, c)| c.index() == i)
        );
        assert_eq!(sector.matrix().w_axis.y, 0.4);
    }

    #[test]
    fn test_report_hover_tags_category() {
        let sector = summer();
        let event = sector.report_hover(CardHover::Over(5));
        assert_eq!(event.category, Category::Summer);
        assert_eq!(event.target(), HoverTarget::new(Category::Summer, 5));
    }

    #[test]
    fn test_sync_activates_siblings_only_in_own_sector() {
        let mut sector = summer();
        sector.sync_hover(Some(HoverTarget::new(Category::Summer, 3)));
        assert_eq!(sector.hovered(), Some(3));
        assert_eq!(sector.cards()[3].state(), CardState::Hovered);
        assert_eq!(sector.cards()[4].state(), CardState::SectorActive);
        assert_eq!(sector.cards().iter().filter(|c| c.hovered()).count(), 1);

        sector.sync_hover(Some(HoverTarget::new(Category::Winter, 3)));
        assert_eq!(sector.hovered(), None);
        assert!(sector.cards().iter().all(|c| c.state() == CardState::Idle));
    }

    #[test]
    fn test_out_of_range_hover_is_ignored() {
        let mut sector = summer();
        sector.sync_hover(Some(HoverTarget::new(Category::Summer, 999)));
        assert_eq!(sector.hovered(), None);
    }
}
