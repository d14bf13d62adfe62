use craft_planner::{
    CraftingConfig, DijkstraSearch, FailureReason, PlanError, PlanVisualizer, Planner, RecipeSpec,
    DEFAULT_TIME_LIMIT,
};
use std::time::Duration;

#[cfg(test)]
mod tests {
    use super::*;

    fn workshop() -> CraftingConfig {
        let mut config = CraftingConfig::default();
        config.items = ["axe", "wood", "house"].map(String::from).to_vec();
        config.recipes.insert(
            "gather wood".to_string(),
            RecipeSpec::new(1).requires("axe").produces("wood", 1),
        );
        config.recipes.insert(
            "build house".to_string(),
            RecipeSpec::new(2).consumes("wood", 1).produces("house", 1),
        );
        config
    }

    #[test]
    fn test_basic_crafting_workflow() {
        // Define the current inventory and the goal
        let config = workshop()
            .with_initial([("axe", 1)])
            .with_goal([("house", 1)]);

        // Find a plan
        let planner = Planner::from_config(&config).unwrap();
        let plan = planner.plan(DEFAULT_TIME_LIMIT).into_plan().unwrap();

        let actions: Vec<_> = plan.actions().collect();
        assert_eq!(actions, ["gather wood", "build house"]);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.total_cost(), 3);

        let vocab = planner.vocabulary();
        let last = plan.final_state().unwrap();
        assert_eq!(last.get(vocab.id("house").unwrap()), 1);
        assert_eq!(last.get(vocab.id("axe").unwrap()), 1);
        assert_eq!(last.get(vocab.id("wood").unwrap()), 0);
    }

    #[test]
    fn test_impossible_goal() {
        // No axe and nothing that makes one
        let config = workshop().with_goal([("house", 1)]);
        let planner = Planner::from_config(&config).unwrap();

        let outcome = planner.plan(DEFAULT_TIME_LIMIT);
        assert!(!outcome.is_found());
        let failure = outcome.failure().unwrap();
        assert_eq!(failure.reason, FailureReason::FrontierExhausted);
        assert_eq!(failure.start, *planner.initial_state());

        let result = planner.plan(DEFAULT_TIME_LIMIT).into_plan();
        assert!(matches!(result, Err(PlanError::NoPlanFound(_))));
    }

    #[test]
    fn test_impossible_goal_under_uniform_cost_search() {
        let config = workshop().with_goal([("house", 1)]);
        let planner = Planner::from_config(&config)
            .unwrap()
            .with_search_algorithm(Box::new(DijkstraSearch));

        let outcome = planner.plan(Duration::from_millis(200));
        assert!(!outcome.is_found());
        assert_eq!(outcome.stats().expanded, 1);
    }

    #[test]
    fn test_multiple_paths_to_goal() {
        let mut config = workshop()
            .with_initial([("wood", 1)])
            .with_goal([("house", 1)]);
        config.recipes.insert(
            "hire builders".to_string(),
            RecipeSpec::new(5).consumes("wood", 1).produces("house", 1),
        );

        let planner = Planner::from_config(&config).unwrap();
        let plan = planner.plan(DEFAULT_TIME_LIMIT).into_plan().unwrap();
        let actions: Vec<_> = plan.actions().collect();
        assert_eq!(actions, ["build house"]);
        assert_eq!(plan.total_cost(), 2);
    }

    #[test]
    fn test_unknown_resource_in_recipe() {
        let mut config = workshop();
        config.recipes.insert(
            "mine gold".to_string(),
            RecipeSpec::new(3).produces("gold", 1),
        );

        let result = Planner::from_config(&config);
        assert!(matches!(
            result,
            Err(PlanError::UnknownResource { ref context, ref resource })
                if context == "recipe 'mine gold'" && resource == "gold"
        ));
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = workshop().with_goal([("house", 1)]);
        let json = config.to_json_string().unwrap();
        assert!(json.contains("\"Requires\""));
        assert_eq!(CraftingConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_visualize_planning() {
        let config = workshop()
            .with_initial([("axe", 1)])
            .with_goal([("house", 1)]);
        let planner = Planner::from_config(&config).unwrap();
        let plan = planner.plan(DEFAULT_TIME_LIMIT).into_plan().unwrap();

        // Visualize the plan
        let path = std::env::temp_dir().join("craft_planner_planning_visualization.dot");
        PlanVisualizer::new()
            .visualize_plan(&plan, planner.goal(), &path)
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("step_0 -> step_1 [label=\"gather wood (+1)\"];"));
        assert!(content.contains("step_1 -> step_2 [label=\"build house (+2)\"];"));
        std::fs::remove_file(&path).unwrap();
    }
}
