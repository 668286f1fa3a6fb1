// Tests for the automation engine


#[cfg(test)]
mod test_pick_resolution;

#[cfg(test)]
mod test_ban_avoidance;

#[cfg(test)]
mod test_rune_conversion;


#[cfg(test)]
mod test_spell_overrides;
